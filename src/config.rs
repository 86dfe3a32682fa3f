//! Configuration surface for notification publishing
//!
//! This module defines the [`NotifierConfig`] struct holding the
//! driver and topic settings consumed at notifier construction time.
//! It uses the `figment` crate to load configuration from a TOML file
//! and merge it with environment variables over the defaults.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_topics() -> Vec<String> {
    vec!["notifications".to_string()]
}

/// Settings read by the notifier when loading drivers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotifierConfig {
    /// Driver names to load for sending notifications. An empty list
    /// makes every notify call a no-op.
    #[serde(default)]
    pub notification_driver: Vec<String>,
    /// Topics on which notifications are published.
    #[serde(default = "default_topics")]
    pub notification_topics: Vec<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            notification_driver: Vec::new(),
            notification_topics: default_topics(),
        }
    }
}

impl NotifierConfig {
    /// Loads configuration from a TOML file, merged with
    /// `HERALD_`-prefixed environment variables over the defaults.
    /// Environment variables take precedence over the file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(NotifierConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("HERALD_"))
            .extract()?;
        Ok(config)
    }
}
