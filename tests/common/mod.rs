//! In-memory stand-in for the posts service used by the integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use pushkind_posts::client::errors::{ClientError, ClientResult};
use pushkind_posts::client::{CatalogReader, PostPage, PostQuery, PostReader, PostWriter};
use pushkind_posts::domain::filter::SortOrder;
use pushkind_posts::domain::post::{Author, Engagement, NewPost, Post, UpdatePost};
use pushkind_posts::domain::stats::{AuthorSummary, DashboardStats};
use pushkind_posts::domain::types::{AuthorId, PostId};

pub fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn not_found() -> ClientError {
    ClientError::Service {
        status: 404,
        message: "Post not found".to_string(),
    }
}

pub struct InMemoryService {
    posts: Mutex<Vec<Post>>,
    pub list_requests: Mutex<usize>,
}

impl InMemoryService {
    /// `count` posts, one per day, alternating between two categories.
    pub fn seeded(count: i64) -> Self {
        let posts = (1..=count)
            .map(|id| Post {
                id: PostId::new(id).unwrap(),
                author: Author {
                    name: if id % 2 == 0 { "Jane Doe" } else { "John Roe" }.to_string(),
                    title: "Engineer".to_string(),
                    affiliation: Some("Acme".to_string()),
                    email: None,
                },
                category: Some(if id % 2 == 0 { "Technology" } else { "Business" }.to_string()),
                content: format!("Post number {id}"),
                date: Some(at(id as u32)),
                engagement: Engagement::new(id as u64, 1, 0, None),
                image: None,
                location: None,
                tags: vec![],
            })
            .collect();

        Self {
            posts: Mutex::new(posts),
            list_requests: Mutex::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostReader for InMemoryService {
    async fn list_posts(&self, query: &PostQuery) -> ClientResult<PostPage> {
        *self.list_requests.lock().unwrap() += 1;
        let filter = &query.filter;
        let search = filter.search_term().map(str::to_lowercase);

        let mut matching: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                search.as_ref().is_none_or(|term| {
                    p.content.to_lowercase().contains(term)
                        || p.author.name.to_lowercase().contains(term)
                })
            })
            .filter(|p| filter.category.is_none() || p.category == filter.category)
            .filter(|p| filter.date_from.is_none_or(|from| p.date.is_some_and(|d| d.date() >= from)))
            .filter(|p| filter.date_to.is_none_or(|to| p.date.is_some_and(|d| d.date() <= to)))
            .cloned()
            .collect();

        match filter.sort {
            SortOrder::Newest => matching.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::Oldest => matching.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::MostLiked => {
                matching.sort_by(|a, b| b.engagement.likes.cmp(&a.engagement.likes))
            }
            SortOrder::MostCommented => {
                matching.sort_by(|a, b| b.engagement.comments.cmp(&a.engagement.comments))
            }
        }

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip((query.page - 1) * query.per_page)
            .take(query.per_page)
            .collect();

        Ok(PostPage {
            items,
            total_pages: total.div_ceil(query.per_page),
            total_count: Some(total),
        })
    }

    async fn get_post(&self, id: PostId) -> ClientResult<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl PostWriter for InMemoryService {
    async fn create_post(&self, post: &NewPost) -> ClientResult<PostId> {
        let mut posts = self.posts.lock().unwrap();
        let next = posts.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        let id = PostId::new(next).unwrap();
        posts.push(Post {
            id,
            author: Author {
                name: "New Author".to_string(),
                title: String::new(),
                affiliation: None,
                email: Some(post.author_email.to_string()),
            },
            category: post.category.as_ref().map(|c| c.to_string()),
            content: post.content.to_string(),
            date: Some(at(31)),
            engagement: Engagement::default(),
            image: None,
            location: post.location.clone(),
            tags: post.tags.clone(),
        });
        Ok(id)
    }

    async fn update_post(&self, id: PostId, updates: &UpdatePost) -> ClientResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        post.content = updates.content.to_string();
        post.category = updates.category.as_ref().map(|c| c.to_string());
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> ClientResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogReader for InMemoryService {
    async fn stats(&self) -> ClientResult<DashboardStats> {
        let posts = self.posts.lock().unwrap();
        Ok(DashboardStats {
            total_posts: posts.len() as u64,
            total_likes: posts.iter().map(|p| p.engagement.likes).sum(),
            total_comments: posts.iter().map(|p| p.engagement.comments).sum(),
            avg_engagement: 0.0,
        })
    }

    async fn categories(&self) -> ClientResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn authors(&self) -> ClientResult<Vec<AuthorSummary>> {
        Ok(vec![AuthorSummary {
            id: AuthorId::new(1).unwrap(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company: Some("Acme".to_string()),
            title: None,
        }])
    }
}
