//! Opaque transport handle handed to driver factories.

use crate::config::NotifierConfig;
use std::sync::Arc;

/// Cheap-to-clone handle to the messaging transport.
///
/// The core never interprets the transport; driver factories capture a
/// clone at construction time and use it to reach their backend. The
/// attached configuration is the same one the notifier reads its
/// driver and topic lists from.
#[derive(Debug, Clone)]
pub struct Transport {
    config: Arc<NotifierConfig>,
}

impl Transport {
    /// Creates a transport handle over the given configuration.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration attached to this transport.
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }
}
