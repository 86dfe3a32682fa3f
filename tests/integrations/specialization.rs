//! Integration tests for notifier specialization.

use herald::drivers::test_utils::CountingDriver;
use herald::{DriverCatalog, Notifier};
use serde_json::json;

#[path = "../helpers/mod.rs"]
mod helpers;

#[tokio::test]
async fn prepare_inherits_the_parent_publisher_id() {
    let (notifier, _driver) = helpers::notifier_with_capture("compute.host1");

    let specialized = notifier.prepare();
    assert_eq!(specialized.publisher_id(), "compute.host1");
}

#[tokio::test]
async fn prepare_as_overrides_the_publisher_id() {
    let (notifier, driver) = helpers::notifier_with_capture("compute.host1");

    let scheduler = notifier.prepare_as("compute.scheduler");
    assert_eq!(scheduler.publisher_id(), "compute.scheduler");
    // The parent keeps its own identity.
    assert_eq!(notifier.publisher_id(), "compute.host1");

    scheduler
        .info(&json!({}), "compute.reschedule", json!({}))
        .await
        .unwrap();
    assert_eq!(
        driver.captured()[0].envelope.publisher_id,
        "compute.scheduler"
    );
}

#[tokio::test]
async fn empty_string_is_a_real_override() {
    let (notifier, _driver) = helpers::notifier_with_capture("compute.host1");

    let anonymous = notifier.prepare_as("");
    assert_eq!(anonymous.publisher_id(), "");
}

#[tokio::test]
async fn specialization_chains_from_the_immediate_parent() {
    let (notifier, _driver) = helpers::notifier_with_capture("compute.host1");

    let first = notifier.prepare_as("compute.api");
    let second = first.prepare();
    assert_eq!(second.publisher_id(), "compute.api");

    let third = second.prepare_as("compute.conductor");
    assert_eq!(third.publisher_id(), "compute.conductor");
}

#[tokio::test]
async fn drivers_are_loaded_once_for_the_whole_family() {
    let counting = CountingDriver::new();
    let mut catalog = DriverCatalog::new();
    catalog.register("counting", counting.factory());

    let notifier = Notifier::builder(helpers::default_transport())
        .publisher_id("compute.host1")
        .driver("counting")
        .catalog(catalog)
        .build()
        .unwrap();
    assert_eq!(counting.constructed(), 1);

    let api = notifier.prepare_as("compute.api");
    let scheduler = notifier.prepare_as("compute.scheduler");
    let nested = api.prepare().prepare_as("compute.api.worker");

    // Any number of specializations shares the one loaded driver set.
    assert_eq!(counting.constructed(), 1);

    let ctxt = json!({});
    notifier.info(&ctxt, "compute.tick", json!({})).await.unwrap();
    api.info(&ctxt, "compute.tick", json!({})).await.unwrap();
    scheduler.info(&ctxt, "compute.tick", json!({})).await.unwrap();
    nested.info(&ctxt, "compute.tick", json!({})).await.unwrap();

    assert_eq!(counting.delivered(), 4);
    assert_eq!(counting.constructed(), 1);
}
