//! Domain entities and value objects of the posts dashboard.

pub mod filter;
pub mod post;
pub mod stats;
pub mod types;
