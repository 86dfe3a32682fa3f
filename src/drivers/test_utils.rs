//! Test drivers for exercising the dispatch pipeline.
//!
//! Only compiled with the `test-utils` feature; integration tests pull
//! these in through a self-referencing dev-dependency.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{DeliveryError, Envelope, NotificationDriver, Priority};
use crate::registry::DriverFactory;

/// One recorded `notify` invocation.
#[derive(Debug, Clone)]
pub struct CapturedNotification {
    pub ctxt: Value,
    pub envelope: Envelope,
    pub priority: Priority,
}

/// A driver that records every notification it receives.
///
/// Clones share the same capture buffer, so a test can keep a handle
/// while the registry owns the instance built by [`CapturingDriver::factory`].
#[derive(Clone, Default)]
pub struct CapturingDriver {
    sent: Arc<Mutex<Vec<CapturedNotification>>>,
}

impl CapturingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notifications received so far, in arrival order.
    pub fn captured(&self) -> Vec<CapturedNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of notifications received so far.
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// A catalog factory producing clones of this driver.
    pub fn factory(&self) -> DriverFactory {
        let template = self.clone();
        Arc::new(move |_, _, _| Ok(Box::new(template.clone()) as _))
    }
}

#[async_trait]
impl NotificationDriver for CapturingDriver {
    fn name(&self) -> &str {
        "capture"
    }

    async fn notify(
        &self,
        ctxt: &Value,
        envelope: &Envelope,
        priority: Priority,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(CapturedNotification {
            ctxt: ctxt.clone(),
            envelope: envelope.clone(),
            priority,
        });
        Ok(())
    }
}

/// A driver whose delivery always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingDriver;

impl FailingDriver {
    /// A catalog factory producing failing drivers.
    pub fn factory() -> DriverFactory {
        Arc::new(|_, _, _| Ok(Box::new(FailingDriver) as _))
    }
}

#[async_trait]
impl NotificationDriver for FailingDriver {
    fn name(&self) -> &str {
        "failing"
    }

    async fn notify(
        &self,
        _ctxt: &Value,
        _envelope: &Envelope,
        _priority: Priority,
    ) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("backend unavailable".to_string()))
    }
}

/// A driver with construction and delivery counters.
///
/// The construction counter increments only inside
/// [`CountingDriver::factory`], which makes it the probe for asserting
/// that specialization never reloads drivers.
#[derive(Clone, Default)]
pub struct CountingDriver {
    constructed: Arc<AtomicUsize>,
    delivered: Arc<AtomicUsize>,
}

impl CountingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many instances the factory has built.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    /// How many notifications all instances have delivered.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    /// A catalog factory that clones this driver, bumping the
    /// construction counter once per build.
    pub fn factory(&self) -> DriverFactory {
        let template = self.clone();
        Arc::new(move |_, _, _| {
            template.constructed.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(template.clone()) as _)
        })
    }
}

#[async_trait]
impl NotificationDriver for CountingDriver {
    fn name(&self) -> &str {
        "counting"
    }

    async fn notify(
        &self,
        _ctxt: &Value,
        _envelope: &Envelope,
        _priority: Priority,
    ) -> Result<(), DeliveryError> {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
