pub mod catalog;
pub mod errors;
pub mod list_view;

pub use errors::{ServiceError, ServiceResult};
