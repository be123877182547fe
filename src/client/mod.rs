use async_trait::async_trait;

use crate::{
    client::errors::ClientResult,
    domain::{
        filter::Filter,
        post::{NewPost, Post, UpdatePost},
        stats::{AuthorSummary, DashboardStats},
        types::PostId,
    },
    dto::api::{ListPostsParams, format_date},
};

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpClient;

/// Everything that determines one requested page of posts.
///
/// Two queries are equal iff all fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostQuery {
    pub filter: Filter,
    pub page: usize,
    pub per_page: usize,
}

impl PostQuery {
    /// Query for the first page of `filter` with the default page size.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            page: 1,
            per_page: crate::pagination::DEFAULT_ITEMS_PER_PAGE,
        }
    }

    /// Selects the page and page size; both are at least 1.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }

    /// Query string parameters; unset filters are left out.
    pub fn to_params(&self) -> ListPostsParams {
        ListPostsParams {
            search: self.filter.search_term().map(str::to_string),
            category: self.filter.category.clone(),
            date_from: self.filter.date_from.map(format_date),
            date_to: self.filter.date_to.map(format_date),
            sort_by: self.filter.sort.as_str(),
            page: self.page,
            limit: self.per_page,
        }
    }
}

/// One page of posts as reported by the service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total_pages: usize,
    pub total_count: Option<usize>,
}

#[async_trait]
pub trait PostReader {
    async fn list_posts(&self, query: &PostQuery) -> ClientResult<PostPage>;
    async fn get_post(&self, id: PostId) -> ClientResult<Post>;
}

#[async_trait]
pub trait PostWriter {
    async fn create_post(&self, post: &NewPost) -> ClientResult<PostId>;
    async fn update_post(&self, id: PostId, updates: &UpdatePost) -> ClientResult<()>;
    async fn delete_post(&self, id: PostId) -> ClientResult<()>;
}

/// Reference data and aggregates that are not part of the post list.
#[async_trait]
pub trait CatalogReader {
    async fn stats(&self) -> ClientResult<DashboardStats>;
    async fn categories(&self) -> ClientResult<Vec<String>>;
    async fn authors(&self) -> ClientResult<Vec<AuthorSummary>>;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::filter::SortOrder;

    #[test]
    fn params_skip_unset_filters() {
        let params = PostQuery::new(Filter::default()).paginate(2, 10).to_params();

        let encoded = serde_html_form::to_string(&params).expect("encodable");
        assert_eq!(encoded, "sortBy=newest&page=2&limit=10");
    }

    #[test]
    fn params_carry_every_applied_filter() {
        let filter = Filter {
            search: "  rust ".to_string(),
            category: Some("Technology".to_string()),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            sort: SortOrder::MostCommented,
        };

        let params = PostQuery::new(filter).to_params();

        assert_eq!(params.search.as_deref(), Some("rust"));
        assert_eq!(params.date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(params.date_to.as_deref(), Some("2024-01-31"));
        assert_eq!(params.sort_by, "mostCommented");
        assert_eq!(params.page, 1);
    }

    #[test]
    fn queries_compare_by_value() {
        let a = PostQuery::new(Filter::default()).paginate(3, 10);
        let b = PostQuery::new(Filter::default()).paginate(3, 10);
        assert_eq!(a, b);
        assert_ne!(a, b.clone().paginate(4, 10));
    }
}
