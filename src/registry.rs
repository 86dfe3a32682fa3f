//! Driver catalog and registry with factory pattern.
//!
//! The [`DriverCatalog`] maintains the set of available driver
//! implementations, keyed by name. The [`DriverRegistry`] resolves the
//! configured list of names into live driver instances exactly once,
//! at notifier construction time.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::NotifierConfig;
use crate::core::NotificationDriver;
use crate::drivers::{LogDriver, NoopDriver};
use crate::transport::Transport;

/// Factory function type for creating notification drivers.
///
/// Every factory receives the shared configuration, the topic list,
/// and a transport handle.
pub type DriverFactory = Arc<
    dyn Fn(&NotifierConfig, &[String], Transport) -> anyhow::Result<Box<dyn NotificationDriver>>
        + Send
        + Sync,
>;

/// Raised when a configured driver cannot be loaded.
#[derive(Debug, Error)]
pub enum DriverLoadError {
    /// The name does not match any registered factory.
    #[error("unknown notification driver '{0}'")]
    UnknownDriver(String),
    /// The factory ran but failed to construct the driver.
    #[error("notification driver '{name}' failed to initialize: {source}")]
    Init {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Catalog of available driver implementations.
///
/// Drivers register a factory function that creates new instances; the
/// notifier resolves the names in its configuration against the
/// catalog when it is built.
#[derive(Clone, Default)]
pub struct DriverCatalog {
    factories: HashMap<String, DriverFactory>,
}

impl DriverCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a catalog with the built-in drivers registered under
    /// the names `"log"` and `"noop"`.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register("log", Arc::new(|_, _, _| Ok(Box::new(LogDriver::new()) as _)));
        catalog.register("noop", Arc::new(|_, _, _| Ok(Box::new(NoopDriver) as _)));
        catalog
    }

    /// Registers a driver factory under the given name, replacing any
    /// previous registration.
    pub fn register(&mut self, name: impl Into<String>, factory: DriverFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Lists all registered driver names.
    pub fn driver_names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Constructs one driver by name.
    ///
    /// # Errors
    ///
    /// Returns [`DriverLoadError::UnknownDriver`] if no factory is
    /// registered under `name`, or [`DriverLoadError::Init`] if the
    /// factory fails.
    pub fn create(
        &self,
        name: &str,
        config: &NotifierConfig,
        topics: &[String],
        transport: Transport,
    ) -> Result<Box<dyn NotificationDriver>, DriverLoadError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DriverLoadError::UnknownDriver(name.to_string()))?;
        factory(config, topics, transport).map_err(|source| DriverLoadError::Init {
            name: name.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for DriverCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverCatalog")
            .field("drivers", &self.driver_names())
            .finish()
    }
}

/// The set of driver instances loaded for one notifier family.
///
/// Loaded once at notifier construction and immutable afterwards;
/// specializations share it by reference. Iteration order is the
/// configured name order, so dispatch order is deterministic.
pub struct DriverRegistry {
    drivers: Vec<Box<dyn NotificationDriver>>,
}

impl DriverRegistry {
    /// Resolves every configured driver name into a live instance,
    /// constructing each with identical (config, topics, transport)
    /// arguments.
    ///
    /// An empty name list produces a valid empty registry.
    ///
    /// # Errors
    ///
    /// Fails on the first name that cannot be resolved or constructed.
    /// The caller must not end up holding a silently partial driver
    /// set.
    pub fn load(
        catalog: &DriverCatalog,
        names: &[String],
        config: &NotifierConfig,
        topics: &[String],
        transport: &Transport,
    ) -> Result<Self, DriverLoadError> {
        let mut drivers = Vec::with_capacity(names.len());
        for name in names {
            drivers.push(catalog.create(name, config, topics, transport.clone())?);
        }
        Ok(Self { drivers })
    }

    /// The loaded driver instances, in configured order.
    pub fn drivers(&self) -> &[Box<dyn NotificationDriver>] {
        &self.drivers
    }

    /// Number of loaded drivers.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// True if no drivers were configured.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.drivers.iter().map(|d| d.name()).collect();
        f.debug_struct("DriverRegistry")
            .field("drivers", &names)
            .finish()
    }
}
