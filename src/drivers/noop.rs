//! Driver that discards every notification.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{DeliveryError, Envelope, NotificationDriver, Priority};

/// Accepts and discards notifications.
///
/// Lets a deployment keep notify calls cheap without touching the
/// call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDriver;

#[async_trait]
impl NotificationDriver for NoopDriver {
    fn name(&self) -> &str {
        "noop"
    }

    async fn notify(
        &self,
        _ctxt: &Value,
        _envelope: &Envelope,
        _priority: Priority,
    ) -> Result<(), DeliveryError> {
        Ok(())
    }
}
