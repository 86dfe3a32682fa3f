//! Integration tests for the entity serializer seam.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use herald::drivers::test_utils::CapturingDriver;
use herald::{DriverCatalog, EntitySerializer, Notifier, NotifyError};
use serde_json::{json, Value};

#[path = "../helpers/mod.rs"]
mod helpers;

/// Wraps payloads and tags contexts, so tests can tell serializer
/// output from raw caller input.
struct WrappingSerializer;

impl EntitySerializer for WrappingSerializer {
    fn serialize_entity(&self, _ctxt: &Value, entity: Value) -> Result<Value> {
        Ok(json!({"entity": entity}))
    }

    fn serialize_context(&self, ctxt: &Value) -> Result<Value> {
        Ok(json!({"context": ctxt}))
    }
}

/// Rejects everything it is asked to serialize.
struct RejectingSerializer;

impl EntitySerializer for RejectingSerializer {
    fn serialize_entity(&self, _ctxt: &Value, _entity: Value) -> Result<Value> {
        Err(anyhow!("payload is not serializable"))
    }

    fn serialize_context(&self, _ctxt: &Value) -> Result<Value> {
        Err(anyhow!("context is not serializable"))
    }
}

fn notifier_with(serializer: Arc<dyn EntitySerializer>) -> (Notifier, CapturingDriver) {
    let driver = CapturingDriver::new();
    let mut catalog = DriverCatalog::new();
    catalog.register("capture", driver.factory());

    let notifier = Notifier::builder(helpers::default_transport())
        .publisher_id("svc.host1")
        .driver("capture")
        .catalog(catalog)
        .serializer(serializer)
        .build()
        .unwrap();
    (notifier, driver)
}

#[tokio::test]
async fn serializer_output_reaches_drivers_unchanged() {
    let (notifier, driver) = notifier_with(Arc::new(WrappingSerializer));
    let ctxt = json!({"request_id": "req-1"});

    notifier
        .info(&ctxt, "svc.event", json!({"key": "value"}))
        .await
        .unwrap();

    let captured = driver.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].envelope.payload, json!({"entity": {"key": "value"}}));
    assert_eq!(captured[0].ctxt, json!({"context": {"request_id": "req-1"}}));
}

#[tokio::test]
async fn serializer_failure_aborts_the_call_before_dispatch() {
    let (notifier, driver) = notifier_with(Arc::new(RejectingSerializer));

    let err = notifier
        .info(&json!({}), "svc.event", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::Payload(_)));

    // No partial envelope was dispatched.
    assert_eq!(driver.count(), 0);
}

/// Accepts payloads but rejects contexts, to reach the second
/// serialization step.
struct ContextRejectingSerializer;

impl EntitySerializer for ContextRejectingSerializer {
    fn serialize_entity(&self, _ctxt: &Value, entity: Value) -> Result<Value> {
        Ok(entity)
    }

    fn serialize_context(&self, _ctxt: &Value) -> Result<Value> {
        Err(anyhow!("context is not serializable"))
    }
}

#[tokio::test]
async fn context_serialization_failure_is_distinguished() {
    let (notifier, driver) = notifier_with(Arc::new(ContextRejectingSerializer));

    let err = notifier
        .warn(&json!({}), "svc.event", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::Context(_)));
    assert_eq!(driver.count(), 0);
}
