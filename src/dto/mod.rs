//! DTO modules that bridge the remote service, the controller and the
//! rendering layer.

pub mod api;
#[cfg(feature = "client")]
pub mod list_view;
