//! Core domain types and service traits for Herald
//!
//! This module defines the notification envelope handed to every
//! delivery driver and the trait contracts that drivers and entity
//! serializers implement.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Severity attached to each notification, selected by the leveled
/// operation used to send it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Priority {
    /// The wire spelling of the priority ("DEBUG" through "CRITICAL").
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Debug => "DEBUG",
            Priority::Info => "INFO",
            Priority::Warn => "WARN",
            Priority::Error => "ERROR",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification event, handed to every driver.
///
/// Every field is populated at build time and an envelope is never
/// mutated afterwards. The serialized request context travels next to
/// the envelope, not inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Unique identifier for this notification.
    pub message_id: String,
    /// Identity of the emitting component (e.g., "compute.host1").
    pub publisher_id: String,
    /// RFC 3339 timestamp of envelope creation.
    pub timestamp: String,
    /// Severity selected by the leveled operation.
    pub priority: Priority,
    /// Free-form category tag (e.g., "compute.create_instance").
    pub event_type: String,
    /// The serialized caller payload.
    pub payload: Value,
}

impl Envelope {
    /// Assembles a new envelope, stamping a fresh message id and the
    /// current time.
    pub fn build(
        publisher_id: &str,
        event_type: &str,
        payload: Value,
        priority: Priority,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            publisher_id: publisher_id.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            priority,
            event_type: event_type.to_string(),
            payload,
        }
    }
}

/// Failure reported by a driver while attempting delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport or backend behind the driver rejected the send.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Any other driver-specific failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// =============================================================================
// Service Traits
// =============================================================================

/// A pluggable delivery backend for notifications.
///
/// Instances are constructed once by the driver registry with the
/// shared (config, topics, transport) arguments and may hold state
/// such as an open connection; `notify` must be safe to invoke
/// repeatedly and concurrently.
#[async_trait]
pub trait NotificationDriver: Send + Sync {
    /// A unique, descriptive name for the driver (e.g., "log", "noop").
    /// Used for logging and diagnostics.
    fn name(&self) -> &str;

    /// Attempts delivery of one notification.
    ///
    /// # Arguments
    /// * `ctxt` - the serialized request context
    /// * `envelope` - the notification to deliver
    /// * `priority` - severity of the notification
    ///
    /// # Returns
    /// * `Ok(())` once the notification was handed to the backend
    /// * `Err` on transport or backend failure
    async fn notify(
        &self,
        ctxt: &Value,
        envelope: &Envelope,
        priority: Priority,
    ) -> Result<(), DeliveryError>;
}

/// Serializes caller payloads and request contexts before dispatch.
///
/// The notifier treats serializer failures as fatal for that single
/// call; nothing is dispatched on error.
pub trait EntitySerializer: Send + Sync {
    /// Serializes a caller payload within the given request context.
    fn serialize_entity(&self, ctxt: &Value, entity: Value) -> Result<Value>;

    /// Serializes the request context itself.
    fn serialize_context(&self, ctxt: &Value) -> Result<Value>;
}

/// Pass-through serializer used when no entity serializer is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSerializer;

impl EntitySerializer for NoOpSerializer {
    fn serialize_entity(&self, _ctxt: &Value, entity: Value) -> Result<Value> {
        Ok(entity)
    }

    fn serialize_context(&self, ctxt: &Value) -> Result<Value> {
        Ok(ctxt.clone())
    }
}
