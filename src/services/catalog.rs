use crate::client::{CatalogReader, PostReader};
use crate::domain::post::Post;
use crate::domain::types::PostId;
use crate::dto::list_view::PostFormData;
use crate::services::{ServiceError, ServiceResult};

/// Fetches a single post for the edit dialog.
pub async fn load_post<R>(repo: &R, id: PostId) -> ServiceResult<Post>
where
    R: PostReader + ?Sized,
{
    repo.get_post(id).await.map_err(|err| {
        log::error!("Failed to load post {id}: {err}");
        ServiceError::from(err)
    })
}

/// Loads the category and author choices of the post dialogs.
pub async fn load_post_form_data<R>(repo: &R) -> ServiceResult<PostFormData>
where
    R: CatalogReader + ?Sized,
{
    let categories = repo.categories().await.map_err(|err| {
        log::error!("Failed to load categories: {err}");
        ServiceError::from(err)
    })?;

    let authors = repo.authors().await.map_err(|err| {
        log::error!("Failed to load authors: {err}");
        ServiceError::from(err)
    })?;

    Ok(PostFormData {
        categories,
        authors,
    })
}
