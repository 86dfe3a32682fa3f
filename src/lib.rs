//! Herald - a notification publisher front-end
//!
//! Builds structured event envelopes from caller-supplied data and
//! fans them out to pluggable delivery drivers registered by name.
//! Service components emit lifecycle and state-change events through
//! leveled operations without coupling to any delivery mechanism.
//!
//! ```rust,ignore
//! let transport = Transport::new(NotifierConfig::load(&path)?);
//! let notifier = Notifier::builder(transport)
//!     .publisher_id("compute.host1")
//!     .build()?;
//!
//! notifier.info(&ctxt, "compute.create_instance", payload).await?;
//! ```
//!
//! Delivery is best-effort: a failing driver is logged and never
//! prevents delivery attempts to the remaining drivers.

pub mod config;
pub mod core;
mod dispatch;
pub mod drivers;
pub mod notifier;
pub mod registry;
pub mod transport;

// Re-export the public surface for convenience
pub use crate::config::NotifierConfig;
pub use crate::core::{
    DeliveryError, EntitySerializer, Envelope, NoOpSerializer, NotificationDriver, Priority,
};
pub use crate::notifier::{Notifier, NotifierBuilder, NotifyError};
pub use crate::registry::{DriverCatalog, DriverFactory, DriverLoadError, DriverRegistry};
pub use crate::transport::Transport;
