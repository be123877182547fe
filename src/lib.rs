//! Client-side core of the posts dashboard: filter state, pagination, the
//! remote collection client and the list view controller.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;
