//! Built-in notification drivers.
//!
//! The default catalog registers these under the names `"log"` and
//! `"noop"`. Heavier backends (message-bus publishers, HTTP senders)
//! live outside this crate and register their own factories.

pub mod log;
pub mod noop;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use log::LogDriver;
pub use noop::NoopDriver;
