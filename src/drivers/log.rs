//! Driver that emits notifications through the process log.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::core::{DeliveryError, Envelope, NotificationDriver, Priority};

/// Writes each notification to the log at the level matching its
/// priority. Topics are ignored; the log stream is the delivery
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDriver;

impl LogDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDriver for LogDriver {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(
        &self,
        _ctxt: &Value,
        envelope: &Envelope,
        priority: Priority,
    ) -> Result<(), DeliveryError> {
        let rendered =
            serde_json::to_string(envelope).map_err(|e| DeliveryError::Other(e.into()))?;
        match priority {
            Priority::Debug => debug!(
                event_type = %envelope.event_type,
                publisher_id = %envelope.publisher_id,
                "{}", rendered
            ),
            Priority::Info => info!(
                event_type = %envelope.event_type,
                publisher_id = %envelope.publisher_id,
                "{}", rendered
            ),
            Priority::Warn => warn!(
                event_type = %envelope.event_type,
                publisher_id = %envelope.publisher_id,
                "{}", rendered
            ),
            // tracing has no level above error
            Priority::Error | Priority::Critical => error!(
                event_type = %envelope.event_type,
                publisher_id = %envelope.publisher_id,
                "{}", rendered
            ),
        }
        Ok(())
    }
}
