//! Runtime settings of the dashboard client.

pub mod config;
