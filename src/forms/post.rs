use serde::Deserialize;
use validator::Validate;

use crate::domain::post::{NewPost, UpdatePost};
use crate::domain::types::{AuthorEmail, CategoryName, PostContent, PostId};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data of the "new post" dialog.
pub struct NewPostForm {
    /// Email of one of the known authors.
    #[validate(email)]
    pub author_email: String,
    /// Post text.
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    /// Comma or whitespace separated tags.
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data of the "edit post" dialog.
pub struct EditPostForm {
    pub id: i64,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::to_string)
        .collect()
}

fn optional_category(raw: &str) -> Result<Option<CategoryName>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(CategoryName::new(raw)?))
}

impl NewPostForm {
    /// Validates the form and converts it into a [`NewPost`].
    pub fn to_new_post(&self) -> Result<NewPost, FormError> {
        self.validate()?;

        Ok(NewPost::new(
            AuthorEmail::new(self.author_email.as_str())?,
            PostContent::new(self.content.as_str())?,
            optional_category(&self.category)?,
            Some(self.location.clone()),
            split_tags(&self.tags),
        ))
    }
}

impl EditPostForm {
    /// Validates the form and returns the target id with its changes.
    pub fn to_update(&self) -> Result<(PostId, UpdatePost), FormError> {
        self.validate()?;

        let id = PostId::new(self.id)?;
        let mut update = UpdatePost::new(
            PostContent::new(self.content.as_str())?,
            optional_category(&self.category)?,
        );
        if let Some(location) = &self.location {
            update = update.with_location(location.as_str());
        }
        if let Some(tags) = &self.tags {
            update = update.with_tags(split_tags(tags));
        }

        Ok((id, update))
    }
}
