//! Home Assistant to Matter thermostat bridge core
//!
//! This crate exposes externally-managed climate entities as Matter-style
//! thermostat cluster endpoints and drives the external integration from
//! protocol-side writes. The core is a bidirectional state synchronizer:
//!
//! - Entity snapshots are projected into a constraint-satisfying cluster
//!   attribute patch (ordered setpoint limits, minimum deadband) applied
//!   atomically per update.
//! - Cluster attribute writes and setpoint commands are translated back into
//!   external action calls, with explicit write provenance preventing
//!   synchronization feedback loops.
//!
//! Transport, discovery, commissioning, and the protocol's own session
//! machinery are consumed as external collaborators and are out of scope.

pub mod actions;
pub mod adapter;
pub mod cluster;
pub mod config;
pub mod constraints;
pub mod entity;
pub mod error;
pub mod logging;
pub mod sync;
pub mod temperature;

// Re-export main types for convenience
pub use actions::{ActionDispatcher, ChannelDispatcher, HassAction};
pub use adapter::{ClimateAdapter, ThermostatAdapter};
pub use cluster::{
    AttributeChange, ClusterWrite, RunningMode, RunningState, SetpointAdjustMode, SystemMode,
    ThermostatClusterState, ThermostatFeatures, WriteOrigin,
};
pub use config::ThermostatDefaults;
pub use entity::EntityState;
pub use error::{BridgeError, Result};
pub use sync::{spawn_synchronizer, SyncEvent, ThermostatSynchronizer};
pub use temperature::Temperature;
