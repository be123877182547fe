//! Mock remote client for isolating the controller and services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::client::errors::ClientResult;
use crate::client::{CatalogReader, PostPage, PostQuery, PostReader, PostWriter};
use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::stats::{AuthorSummary, DashboardStats};
use crate::domain::types::PostId;

mock! {
    pub Remote {}

    #[async_trait]
    impl PostReader for Remote {
        async fn list_posts(&self, query: &PostQuery) -> ClientResult<PostPage>;
        async fn get_post(&self, id: PostId) -> ClientResult<Post>;
    }

    #[async_trait]
    impl PostWriter for Remote {
        async fn create_post(&self, post: &NewPost) -> ClientResult<PostId>;
        async fn update_post(&self, id: PostId, updates: &UpdatePost) -> ClientResult<()>;
        async fn delete_post(&self, id: PostId) -> ClientResult<()>;
    }

    #[async_trait]
    impl CatalogReader for Remote {
        async fn stats(&self) -> ClientResult<DashboardStats>;
        async fn categories(&self) -> ClientResult<Vec<String>>;
        async fn authors(&self) -> ClientResult<Vec<AuthorSummary>>;
    }
}
