//! Integration tests for per-driver failure isolation.

use herald::drivers::test_utils::{CapturingDriver, FailingDriver};
use herald::{DriverCatalog, Notifier};
use serde_json::json;

#[path = "../helpers/mod.rs"]
mod helpers;

#[tokio::test]
async fn failing_first_driver_does_not_block_the_second() {
    let capture = CapturingDriver::new();
    let mut catalog = DriverCatalog::new();
    catalog.register("failing", FailingDriver::factory());
    catalog.register("capture", capture.factory());

    let notifier = Notifier::builder(helpers::default_transport())
        .publisher_id("svc.host1")
        .drivers(["failing", "capture"])
        .catalog(catalog)
        .build()
        .unwrap();

    // The call must not raise even though the first driver failed.
    notifier
        .error(&json!({}), "svc.crash", json!({"code": 1}))
        .await
        .unwrap();

    // The second driver was still invoked, exactly once.
    assert_eq!(capture.count(), 1);
    assert_eq!(capture.captured()[0].envelope.event_type, "svc.crash");
}

#[tokio::test]
async fn every_driver_failing_still_returns_ok() {
    let mut catalog = DriverCatalog::new();
    catalog.register("failing", FailingDriver::factory());

    let notifier = Notifier::builder(helpers::default_transport())
        .publisher_id("svc.host1")
        .drivers(["failing", "failing", "failing"])
        .catalog(catalog)
        .build()
        .unwrap();
    assert_eq!(notifier.registry().len(), 3);

    notifier
        .critical(&json!({}), "svc.meltdown", json!({}))
        .await
        .unwrap();
}

#[tokio::test]
async fn builtin_drivers_deliver_through_the_pipeline() {
    let notifier = Notifier::builder(helpers::default_transport())
        .publisher_id("svc.host1")
        .drivers(["log", "noop"])
        .build()
        .unwrap();

    notifier
        .info(&json!({"request_id": "req-1"}), "svc.started", json!({"pid": 42}))
        .await
        .unwrap();
}
