//! Wire shapes exchanged with the posts service and their mapping into domain
//! types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::filter::DATE_FORMAT;
use crate::domain::post::{Author, Engagement, NewPost, Post, UpdatePost};
use crate::domain::stats::{AuthorSummary, DashboardStats};
use crate::domain::types::{AuthorId, PostId, SvgImage, TypeConstraintError};

/// Query string of `GET /posts`. Absent fields are omitted entirely.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    pub sort_by: &'static str,
    pub page: usize,
    pub limit: usize,
}

/// Formats a filter date the way the `dateFrom`/`dateTo` parameters expect.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i64,
    pub author: AuthorDto,
    /// `null` when the service could not clean the text.
    #[serde(default)]
    pub content: Option<String>,
    /// `null` when the service could not parse the timestamp.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub total_engagements: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total_pages: usize,
    #[serde(default)]
    pub current_page: Option<usize>,
    /// The service reports the match count as `totalPosts`; `totalCount` is
    /// accepted as well.
    #[serde(default, alias = "totalCount")]
    pub total_posts: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest<'a> {
    pub author_email: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub tags: &'a [String],
}

impl<'a> From<&'a NewPost> for CreatePostRequest<'a> {
    fn from(post: &'a NewPost) -> Self {
        Self {
            author_email: post.author_email.as_str(),
            content: post.content.as_str(),
            category: post.category.as_ref().map(|c| c.as_str()).unwrap_or(""),
            location: post.location.as_deref().unwrap_or(""),
            tags: &post.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest<'a> {
    pub content: &'a str,
    pub category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

impl<'a> From<&'a UpdatePost> for UpdatePostRequest<'a> {
    fn from(post: &'a UpdatePost) -> Self {
        Self {
            content: post.content.as_str(),
            category: post.category.as_ref().map(|c| c.as_str()).unwrap_or(""),
            location: post.location.as_deref(),
            tags: post.tags.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body of every non-success response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "message")]
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub avg_engagement: f64,
}

impl From<StatsDto> for DashboardStats {
    fn from(dto: StatsDto) -> Self {
        Self {
            total_posts: dto.total_posts,
            total_likes: dto.total_likes,
            total_comments: dto.total_comments,
            avg_engagement: dto.avg_engagement,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSummaryDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TryFrom<AuthorSummaryDto> for AuthorSummary {
    type Error = TypeConstraintError;

    fn try_from(dto: AuthorSummaryDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AuthorId::new(dto.id)?,
            name: dto.name,
            email: dto.email,
            company: non_blank(dto.company),
            title: non_blank(dto.title),
        })
    }
}

/// Parses the timestamp formats produced by the service.
pub fn parse_post_date(value: &str) -> Result<NaiveDateTime, TypeConstraintError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_utc()))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| TypeConstraintError::InvalidValue(format!("unparseable date `{value}`")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<PostDto> for Post {
    type Error = TypeConstraintError;

    /// Malformed images and dates are dropped rather than failing the whole
    /// post. Missing content becomes an empty string.
    fn try_from(dto: PostDto) -> Result<Self, Self::Error> {
        let id = PostId::new(dto.id)?;
        let date = match non_blank(dto.date) {
            Some(raw) => match parse_post_date(&raw) {
                Ok(date) => Some(date),
                Err(err) => {
                    log::warn!("Dropping date of post {id}: {err}");
                    None
                }
            },
            None => None,
        };

        let image = match non_blank(dto.image) {
            Some(raw) => match SvgImage::new(raw) {
                Ok(image) => Some(image),
                Err(err) => {
                    log::warn!("Dropping image of post {id}: {err}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            id,
            author: Author {
                name: dto.author.name,
                title: dto.author.title.unwrap_or_default(),
                affiliation: non_blank(dto.author.company),
                email: non_blank(dto.author.email),
            },
            category: non_blank(dto.category),
            content: dto.content.unwrap_or_default(),
            date,
            engagement: Engagement::new(
                dto.likes,
                dto.comments,
                dto.shares,
                dto.total_engagements,
            ),
            image,
            location: non_blank(dto.location),
            tags: dto.tags,
        })
    }
}
