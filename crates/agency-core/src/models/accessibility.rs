use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Descriptive text derived from an upload for assistive technology.
///
/// Computed once per upload and returned to the caller; persisting it next to the
/// stored file is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
