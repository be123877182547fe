use serde::{Deserialize, Serialize};

use crate::domain::types::AuthorId;

/// Aggregate numbers shown in the dashboard stat tiles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// Average engagement rate in percent, rounded to one decimal.
    pub avg_engagement: f64,
}

/// Author entry offered by the "new post" form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub title: Option<String>,
}
