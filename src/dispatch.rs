//! Fan-out delivery of one envelope to every loaded driver.

use serde_json::Value;
use tracing::error;

use crate::core::{Envelope, Priority};
use crate::registry::DriverRegistry;

/// Delivers one envelope to every driver in the registry, in order.
///
/// Failures are isolated per driver: a failing driver is logged with
/// the envelope payload for diagnosis and the remaining drivers are
/// still attempted. Delivery is best-effort, one attempt per driver,
/// no retries. An empty registry performs no work.
pub(crate) async fn dispatch(
    registry: &DriverRegistry,
    ctxt: &Value,
    envelope: &Envelope,
    priority: Priority,
) {
    for driver in registry.drivers() {
        if let Err(e) = driver.notify(ctxt, envelope, priority).await {
            error!(
                driver = driver.name(),
                error = %e,
                payload = %envelope.payload,
                "Failed to deliver notification"
            );
        }
    }
}
