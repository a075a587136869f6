//! Outbound action descriptors and dispatch
//!
//! Actions are opaque to the synchronizer core: adapters build them, the
//! dispatcher forwards them to the external integration, and nothing in this
//! crate waits for the outcome. Retries and timeouts belong to the external
//! integration's own reconciliation loop.

use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;

/// A service call against the external integration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HassAction {
    /// Service domain, e.g. `climate`
    pub domain: String,

    /// Service name, e.g. `set_temperature`
    pub service: String,

    /// Target entity
    pub entity_id: String,

    /// Service-specific payload
    pub data: serde_json::Value,
}

impl HassAction {
    pub fn new<S: Into<String>>(domain: S, service: S, entity_id: S) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            entity_id: entity_id.into(),
            data: json!({}),
        }
    }

    /// Build a `climate.set_temperature` call with a single target
    pub fn set_temperature(entity_id: &str, celsius: f64) -> Self {
        Self {
            domain: "climate".to_string(),
            service: "set_temperature".to_string(),
            entity_id: entity_id.to_string(),
            data: json!({ "temperature": celsius }),
        }
    }

    /// Build a `climate.set_temperature` call with a low/high target range
    pub fn set_temperature_range(entity_id: &str, low: f64, high: f64) -> Self {
        Self {
            domain: "climate".to_string(),
            service: "set_temperature".to_string(),
            entity_id: entity_id.to_string(),
            data: json!({ "target_temp_low": low, "target_temp_high": high }),
        }
    }

    /// Build a `climate.set_hvac_mode` call
    pub fn set_hvac_mode(entity_id: &str, mode: &str) -> Self {
        Self {
            domain: "climate".to_string(),
            service: "set_hvac_mode".to_string(),
            entity_id: entity_id.to_string(),
            data: json!({ "hvac_mode": mode }),
        }
    }
}

/// Fire-and-forget action delivery to the external integration
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Hand an action to the external integration
    ///
    /// Completion or failure of the underlying service call is the external
    /// integration's concern; implementations must not block on it.
    async fn call_action(&self, action: HassAction) -> Result<()>;
}

/// Channel-backed dispatcher
///
/// Queues actions onto an unbounded channel drained by the external
/// integration. A closed channel (integration shut down) surfaces as a
/// retryable dispatch error; the synchronizer absorbs it so its handlers
/// stay infallible.
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<HassAction>,
}

impl ChannelDispatcher {
    /// Create a dispatcher and the receiving end for the integration
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HassAction>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ActionDispatcher for ChannelDispatcher {
    async fn call_action(&self, action: HassAction) -> Result<()> {
        self.sender
            .send(action)
            .map_err(|e| BridgeError::dispatch(format!("action queue closed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_temperature_payload() {
        let action = HassAction::set_temperature("climate.office", 21.0);
        assert_eq!(action.domain, "climate");
        assert_eq!(action.service, "set_temperature");
        assert_eq!(action.data, json!({ "temperature": 21.0 }));
    }

    #[test]
    fn test_set_temperature_range_payload() {
        let action = HassAction::set_temperature_range("climate.office", 20.0, 22.5);
        assert_eq!(
            action.data,
            json!({ "target_temp_low": 20.0, "target_temp_high": 22.5 })
        );
    }

    #[tokio::test]
    async fn test_channel_dispatcher_delivers() {
        let (dispatcher, mut receiver) = ChannelDispatcher::new();
        let action = HassAction::set_hvac_mode("climate.office", "heat");
        dispatcher.call_action(action.clone()).await.unwrap();
        assert_eq!(receiver.recv().await, Some(action));
    }

    #[tokio::test]
    async fn test_closed_channel_is_a_retryable_dispatch_error() {
        let (dispatcher, receiver) = ChannelDispatcher::new();
        drop(receiver);
        let action = HassAction::set_hvac_mode("climate.office", "off");
        let err = dispatcher.call_action(action).await.unwrap_err();
        assert!(matches!(err, BridgeError::Dispatch(_)));
        assert!(err.is_retryable());
    }
}
