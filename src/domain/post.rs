use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AuthorEmail, CategoryName, PostContent, PostId, SvgImage};

/// Author block embedded into every post.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    /// Job title shown under the author's name.
    pub title: String,
    /// Company or organisation, when known.
    pub affiliation: Option<String>,
    pub email: Option<String>,
}

/// Engagement counters of a post.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub total: u64,
}

impl Engagement {
    /// Builds the counters, deriving the total from likes and comments unless
    /// the service reported one.
    #[must_use]
    pub fn new(likes: u64, comments: u64, shares: u64, total: Option<u64>) -> Self {
        Self {
            likes,
            comments,
            shares,
            total: total.unwrap_or(likes.saturating_add(comments)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    /// Empty categories are normalized to `None`.
    pub category: Option<String>,
    pub content: String,
    /// `None` when the service sent no usable timestamp.
    pub date: Option<NaiveDateTime>,
    pub engagement: Engagement,
    pub image: Option<SvgImage>,
    pub location: Option<String>,
    pub tags: Vec<String>,
}

/// Payload accepted by the create operation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub author_email: AuthorEmail,
    pub content: PostContent,
    pub category: Option<CategoryName>,
    pub location: Option<String>,
    pub tags: Vec<String>,
}

impl NewPost {
    #[must_use]
    pub fn new(
        author_email: AuthorEmail,
        content: PostContent,
        category: Option<CategoryName>,
        location: Option<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            author_email,
            content,
            category,
            location: location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            tags: normalize_tags(tags),
        }
    }
}

/// Fields changed by the update operation.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatePost {
    pub content: PostContent,
    pub category: Option<CategoryName>,
    /// `None` leaves the stored location untouched.
    pub location: Option<String>,
    /// `None` leaves the stored tags untouched.
    pub tags: Option<Vec<String>>,
}

impl UpdatePost {
    #[must_use]
    pub fn new(content: PostContent, category: Option<CategoryName>) -> Self {
        Self {
            content,
            category,
            location: None,
            tags: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(normalize_tags(tags));
        self
    }
}

/// Trims tags, prefixes them with `#` and drops blanks and duplicates while
/// keeping the first occurrence order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim().trim_start_matches('#').trim();
        if trimmed.is_empty() {
            continue;
        }
        let tag = format!("#{trimmed}");
        if !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_total_defaults_to_likes_plus_comments() {
        assert_eq!(Engagement::new(10, 4, 2, None).total, 14);
        assert_eq!(Engagement::new(10, 4, 2, Some(40)).total, 40);
    }

    #[test]
    fn engagement_total_saturates() {
        assert_eq!(Engagement::new(u64::MAX, 5, 0, None).total, u64::MAX);
    }

    #[test]
    fn normalize_tags_prefixes_and_deduplicates() {
        let tags = normalize_tags(["tech", " #tech", "", "#ai ", "#"]);
        assert_eq!(tags, vec!["#tech", "#ai"]);
    }

    #[test]
    fn new_post_drops_blank_location() {
        let post = NewPost::new(
            AuthorEmail::new("a@example.com").expect("email"),
            PostContent::new("Hello").expect("content"),
            None,
            Some("   ".to_string()),
            vec![],
        );
        assert_eq!(post.location, None);
    }
}
