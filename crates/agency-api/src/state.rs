//! Application state shared by all handlers.

use agency_core::{AllowList, Config};
use agency_storage::FileStorage;
use std::sync::Arc;

use crate::upload::filter::UploadFilter;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn FileStorage>,
    general_filter: UploadFilter,
    image_filter: UploadFilter,
    document_filter: UploadFilter,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn FileStorage>) -> Self {
        let upload = config.upload();
        Self {
            general_filter: UploadFilter::for_kind(upload, AllowList::General),
            image_filter: UploadFilter::for_kind(upload, AllowList::Images),
            document_filter: UploadFilter::for_kind(upload, AllowList::Documents),
            config,
            storage,
        }
    }

    /// Accept/reject filter for an allow-list
    pub fn filter(&self, list: AllowList) -> &UploadFilter {
        match list {
            AllowList::General => &self.general_filter,
            AllowList::Images => &self.image_filter,
            AllowList::Documents => &self.document_filter,
        }
    }
}
