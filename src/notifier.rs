//! The caller-facing notifier: envelope pipeline and specialization.
//!
//! A [`Notifier`] is built once per logical publisher family — driver
//! loading makes construction relatively expensive — and then
//! specialized cheaply per component with [`Notifier::prepare`] or
//! [`Notifier::prepare_as`], which reuse the already-loaded drivers.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::{EntitySerializer, Envelope, NoOpSerializer, Priority};
use crate::dispatch;
use crate::registry::{DriverCatalog, DriverLoadError, DriverRegistry};
use crate::transport::Transport;

/// Raised when a single notify call cannot produce an envelope.
///
/// Delivery failures are not surfaced here; they are logged per driver
/// and never abort the call.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The injected serializer rejected the caller's payload.
    #[error("failed to serialize notification payload: {0}")]
    Payload(#[source] anyhow::Error),
    /// The injected serializer rejected the request context.
    #[error("failed to serialize request context: {0}")]
    Context(#[source] anyhow::Error),
}

/// State shared between a notifier and all of its specializations.
struct NotifierCore {
    transport: Transport,
    topics: Vec<String>,
    serializer: Arc<dyn EntitySerializer>,
    registry: DriverRegistry,
}

/// Sends notification messages through the loaded drivers.
///
/// Each notify call serializes the caller's payload and context,
/// assembles an envelope, and hands it to every driver loaded for this
/// notifier family:
///
/// ```rust,ignore
/// let transport = Transport::new(NotifierConfig::load(&path)?);
/// let notifier = Notifier::builder(transport)
///     .publisher_id("compute.host1")
///     .build()?;
///
/// notifier.info(&ctxt, "compute.create_instance", payload).await?;
///
/// // Cheap per-component specialization over the same loaded drivers.
/// let scheduler = notifier.prepare_as("compute.scheduler");
/// scheduler.warn(&ctxt, "compute.reschedule", payload).await?;
/// ```
///
/// All post-construction state is immutable, so a notifier and its
/// specializations may be used from multiple tasks concurrently.
pub struct Notifier {
    core: Arc<NotifierCore>,
    publisher_id: String,
}

impl Notifier {
    /// Starts building a notifier over the given transport.
    pub fn builder(transport: Transport) -> NotifierBuilder {
        NotifierBuilder::new(transport)
    }

    /// The publisher identity stamped on outgoing envelopes.
    pub fn publisher_id(&self) -> &str {
        &self.publisher_id
    }

    /// The topics the drivers were constructed with.
    pub fn topics(&self) -> &[String] {
        &self.core.topics
    }

    /// The transport the drivers were constructed with.
    pub fn transport(&self) -> &Transport {
        &self.core.transport
    }

    /// The loaded driver set backing this notifier family.
    pub fn registry(&self) -> &DriverRegistry {
        &self.core.registry
    }

    /// Returns a specialized notifier inheriting this notifier's
    /// publisher id.
    ///
    /// Specialization shares the parent's loaded driver set and
    /// serializer; drivers are never constructed again.
    pub fn prepare(&self) -> Notifier {
        Notifier {
            core: Arc::clone(&self.core),
            publisher_id: self.publisher_id.clone(),
        }
    }

    /// Returns a specialized notifier with `publisher_id` overridden.
    ///
    /// An explicitly supplied empty string is a real override,
    /// distinct from calling [`Notifier::prepare`].
    pub fn prepare_as(&self, publisher_id: impl Into<String>) -> Notifier {
        Notifier {
            core: Arc::clone(&self.core),
            publisher_id: publisher_id.into(),
        }
    }

    async fn notify(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
        priority: Priority,
    ) -> Result<(), NotifyError> {
        let payload = self
            .core
            .serializer
            .serialize_entity(ctxt, payload)
            .map_err(NotifyError::Payload)?;
        let ctxt = self
            .core
            .serializer
            .serialize_context(ctxt)
            .map_err(NotifyError::Context)?;

        let envelope = Envelope::build(&self.publisher_id, event_type, payload, priority);
        dispatch::dispatch(&self.core.registry, &ctxt, &envelope, priority).await;
        Ok(())
    }

    /// Sends a notification at debug level.
    ///
    /// # Arguments
    /// * `ctxt` - the request context
    /// * `event_type` - describes the event, e.g. "compute.create_instance"
    /// * `payload` - the notification payload
    pub async fn debug(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
    ) -> Result<(), NotifyError> {
        self.notify(ctxt, event_type, payload, Priority::Debug).await
    }

    /// Sends a notification at info level.
    pub async fn info(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
    ) -> Result<(), NotifyError> {
        self.notify(ctxt, event_type, payload, Priority::Info).await
    }

    /// Sends a notification at warning level.
    pub async fn warn(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
    ) -> Result<(), NotifyError> {
        self.notify(ctxt, event_type, payload, Priority::Warn).await
    }

    /// Sends a notification at error level.
    pub async fn error(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
    ) -> Result<(), NotifyError> {
        self.notify(ctxt, event_type, payload, Priority::Error).await
    }

    /// Sends a notification at critical level.
    pub async fn critical(
        &self,
        ctxt: &Value,
        event_type: &str,
        payload: Value,
    ) -> Result<(), NotifyError> {
        self.notify(ctxt, event_type, payload, Priority::Critical)
            .await
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("publisher_id", &self.publisher_id)
            .field("topics", &self.core.topics)
            .field("registry", &self.core.registry)
            .finish()
    }
}

/// Builder for [`Notifier`].
///
/// Driver names and topics default to the transport configuration;
/// explicit values override it. Driver loading happens exactly once,
/// inside [`NotifierBuilder::build`].
pub struct NotifierBuilder {
    transport: Transport,
    publisher_id: Option<String>,
    drivers: Option<Vec<String>>,
    topics: Option<Vec<String>>,
    serializer: Option<Arc<dyn EntitySerializer>>,
    catalog: Option<DriverCatalog>,
}

impl NotifierBuilder {
    fn new(transport: Transport) -> Self {
        Self {
            transport,
            publisher_id: None,
            drivers: None,
            topics: None,
            serializer: None,
            catalog: None,
        }
    }

    /// Sets the publisher identity (e.g., "compute.host1").
    pub fn publisher_id(mut self, publisher_id: impl Into<String>) -> Self {
        self.publisher_id = Some(publisher_id.into());
        self
    }

    /// Loads a single driver instead of the configured list.
    pub fn driver(mut self, name: impl Into<String>) -> Self {
        self.drivers = Some(vec![name.into()]);
        self
    }

    /// Loads the given drivers instead of the configured list.
    pub fn drivers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drivers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Publishes on a single topic instead of the configured list.
    pub fn topic(mut self, name: impl Into<String>) -> Self {
        self.topics = Some(vec![name.into()]);
        self
    }

    /// Publishes on the given topics instead of the configured list.
    pub fn topics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Injects an entity serializer; defaults to the pass-through
    /// [`NoOpSerializer`].
    pub fn serializer(mut self, serializer: Arc<dyn EntitySerializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Resolves driver names against this catalog instead of the
    /// built-in one.
    pub fn catalog(mut self, catalog: DriverCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Loads the configured drivers and returns the notifier.
    ///
    /// # Errors
    ///
    /// Fails if any configured driver name is unknown to the catalog
    /// or its factory fails. A notifier is never constructed with a
    /// partial driver set.
    pub fn build(self) -> Result<Notifier, DriverLoadError> {
        let config = self.transport.config().clone();
        let driver_names = self
            .drivers
            .unwrap_or_else(|| config.notification_driver.clone());
        let topics = self
            .topics
            .unwrap_or_else(|| config.notification_topics.clone());
        let serializer = self
            .serializer
            .unwrap_or_else(|| Arc::new(NoOpSerializer));
        let catalog = self.catalog.unwrap_or_else(DriverCatalog::with_builtins);

        let registry =
            DriverRegistry::load(&catalog, &driver_names, &config, &topics, &self.transport)?;

        Ok(Notifier {
            core: Arc::new(NotifierCore {
                transport: self.transport,
                topics,
                serializer,
                registry,
            }),
            publisher_id: self.publisher_id.unwrap_or_default(),
        })
    }
}
