use crate::{FileStorage, PartitionedLocalStorage, StorageError, StorageResult};
use agency_core::{Config, Partition};
use std::sync::Arc;

/// Create the storage backend from configuration
///
/// Both partition roots are created eagerly so a misconfigured upload directory fails
/// at startup rather than on the first upload.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn FileStorage>> {
    let upload = config.upload();
    let public_root = upload.partition_root(Partition::Public);
    let private_root = upload.partition_root(Partition::Private);

    if public_root == private_root {
        return Err(StorageError::ConfigError(
            "Public and private upload directories must differ".to_string(),
        ));
    }

    let storage = PartitionedLocalStorage::from_config(upload);
    storage.ensure_partitions().await?;

    tracing::info!(
        public_root = %public_root.display(),
        private_root = %private_root.display(),
        "Local partitioned storage initialized"
    );

    Ok(Arc::new(storage))
}
