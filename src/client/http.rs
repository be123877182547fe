//! `reqwest` implementation of the remote collection client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::errors::{ClientError, ClientResult};
use crate::client::{CatalogReader, PostPage, PostQuery, PostReader, PostWriter};
use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::stats::{AuthorSummary, DashboardStats};
use crate::domain::types::PostId;
use crate::dto::api::{
    AuthorSummaryDto, CreatePostRequest, CreatedResponse, ErrorBody, PostDto, PostListResponse,
    StatsDto, UpdatePostRequest,
};
use crate::models::config::ClientConfig;

/// HTTP client bound to the posts service base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Builds a client. Requests exceeding `timeout` fail as transport errors.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from the base URL and timeout in `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(service_failure(status, &body));
        }

        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds a [`ClientError::Service`] from the `error` field of the body,
/// falling back to the status reason.
fn service_failure(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response status")
                .to_string()
        });

    ClientError::Service {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PostReader for HttpClient {
    async fn list_posts(&self, query: &PostQuery) -> ClientResult<PostPage> {
        let params = serde_html_form::to_string(query.to_params())
            .map_err(|e| ClientError::Transport(format!("Failed to encode query: {e}")))?;
        let url = format!("{}?{}", self.url("posts"), params);

        let response: PostListResponse = self.fetch(self.http.get(url)).await?;

        let items = response
            .posts
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PostPage {
            items,
            total_pages: response.pagination.total_pages,
            total_count: response.pagination.total_posts,
        })
    }

    async fn get_post(&self, id: PostId) -> ClientResult<Post> {
        let dto: PostDto = self
            .fetch(self.http.get(self.url(&format!("posts/{id}"))))
            .await?;
        Ok(Post::try_from(dto)?)
    }
}

#[async_trait]
impl PostWriter for HttpClient {
    async fn create_post(&self, post: &NewPost) -> ClientResult<PostId> {
        let request = self
            .http
            .post(self.url("posts"))
            .json(&CreatePostRequest::from(post));
        let created: CreatedResponse = self.fetch(request).await?;
        Ok(PostId::new(created.id)?)
    }

    async fn update_post(&self, id: PostId, updates: &UpdatePost) -> ClientResult<()> {
        let request = self
            .http
            .put(self.url(&format!("posts/{id}")))
            .json(&UpdatePostRequest::from(updates));
        self.send(request).await?;
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> ClientResult<()> {
        self.send(self.http.delete(self.url(&format!("posts/{id}"))))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogReader for HttpClient {
    async fn stats(&self) -> ClientResult<DashboardStats> {
        let dto: StatsDto = self.fetch(self.http.get(self.url("stats"))).await?;
        Ok(dto.into())
    }

    async fn categories(&self) -> ClientResult<Vec<String>> {
        self.fetch(self.http.get(self.url("categories"))).await
    }

    async fn authors(&self) -> ClientResult<Vec<AuthorSummary>> {
        let dtos: Vec<AuthorSummaryDto> = self.fetch(self.http.get(self.url("authors"))).await?;
        Ok(dtos
            .into_iter()
            .map(AuthorSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
