use serde::Serialize;

use crate::domain::filter::Filter;
use crate::domain::post::Post;
use crate::domain::stats::{AuthorSummary, DashboardStats};
use crate::pagination::Paginated;
use crate::services::ServiceError;

/// Progress of the most recent list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ServiceError),
}

impl LoadStatus {
    /// True while a list request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// Everything the rendering layer needs to draw the posts list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewSnapshot {
    /// Displayed posts with the page strip; the strip is empty when
    /// pagination controls must be hidden.
    pub posts: Paginated<Post>,
    pub total_count: Option<usize>,
    /// Filter values currently shown in the inputs.
    pub draft: Filter,
    /// Filter values the displayed posts were requested with.
    pub applied: Filter,
    pub status: LoadStatus,
    /// Disables submit buttons while a mutation is pending.
    pub submitting: bool,
    pub stats: Option<DashboardStats>,
    /// Inline notice for the last failed create/update/delete.
    pub last_mutation_error: Option<ServiceError>,
}

/// Result payload of the catalog services used by the post dialogs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostFormData {
    pub categories: Vec<String>,
    pub authors: Vec<AuthorSummary>,
}
