// Loads configuration using the 'config' crate and 'dotenv'

use anyhow::{ensure, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::engine::{AUTOPLAY_INTERVAL, SWIPE_THRESHOLD};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Base URL of the dealership REST backend, e.g. https://backend.example.com/api
    pub backend_api_url: String,
    pub proxy_url: Option<String>,
    pub request_timeout_secs: u64,

    // Browsing
    pub page_size: usize,
    pub showroom_page_size: usize,
    pub autoplay_interval_ms: u64,
    pub swipe_threshold: f64,

    // Caching
    pub catalog_ttl_secs: u64,
    pub filter_cache_size: usize,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("backend_api_url", "http://127.0.0.1:8000/api")?
            .set_default("request_timeout_secs", 15_i64)?
            .set_default("page_size", 6_i64)?
            .set_default("showroom_page_size", 3_i64)?
            .set_default("autoplay_interval_ms", AUTOPLAY_INTERVAL.as_millis() as i64)?
            .set_default("swipe_threshold", SWIPE_THRESHOLD)?
            .set_default("catalog_ttl_secs", 300_i64)?
            .set_default("filter_cache_size", 64_i64)?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., SHOWROOM_BACKEND_API_URL)
            .add_source(Environment::with_prefix("SHOWROOM").try_parsing(true));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.page_size > 0, "page_size must be greater than zero");
        ensure!(self.showroom_page_size > 0, "showroom_page_size must be greater than zero");
        ensure!(self.filter_cache_size > 0, "filter_cache_size must be greater than zero");
        ensure!(
            self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0,
            "swipe_threshold must be a non-negative number"
        );
        Ok(())
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        server_address: "127.0.0.1:0".to_string(),
        backend_api_url: "http://127.0.0.1:9/api".to_string(),
        proxy_url: None,
        request_timeout_secs: 1,
        page_size: 6,
        showroom_page_size: 3,
        autoplay_interval_ms: 5000,
        swipe_threshold: 50.0,
        catalog_ttl_secs: 300,
        filter_cache_size: 16,
    }
}
