//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_WINDOW_SIZE};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Settings of the remote collection client and the list view.
pub struct ClientConfig {
    /// Base URL of the posts service, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            page_size: default_page_size(),
            window_size: default_window_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// profile and `APP_*` environment overrides.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .set_default("api_base_url", Self::default().api_base_url)?
            .build()?
            .try_deserialize()
    }
}
