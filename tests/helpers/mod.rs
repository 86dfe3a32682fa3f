#![allow(dead_code)]

use herald::drivers::test_utils::CapturingDriver;
use herald::{DriverCatalog, Notifier, NotifierConfig, Transport};

/// Creates a transport over the default configuration.
pub fn default_transport() -> Transport {
    Transport::new(NotifierConfig::default())
}

/// Builds a notifier wired to a single capturing driver, returning a
/// handle to the capture buffer alongside it.
pub fn notifier_with_capture(publisher_id: &str) -> (Notifier, CapturingDriver) {
    let driver = CapturingDriver::new();
    let mut catalog = DriverCatalog::new();
    catalog.register("capture", driver.factory());

    let notifier = Notifier::builder(default_transport())
        .publisher_id(publisher_id)
        .driver("capture")
        .catalog(catalog)
        .build()
        .expect("capture driver should load");
    (notifier, driver)
}
