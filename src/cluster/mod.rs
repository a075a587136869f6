//! Matter thermostat cluster model
//!
//! Cluster-side types for the thermostat instance: the mode enums with their
//! Matter numeric discriminants, the running-state record reported to
//! controllers, attribute identities, and the change notifications the
//! synchronizer emits and receives. Provenance travels on every change as an
//! explicit [`WriteOrigin`] so loop suppression never depends on ambient
//! transaction context.

pub mod running_state;
pub mod state;

pub use running_state::resolve_running_state;
pub use state::{ThermostatClusterState, ThermostatPatch};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thermostat system mode (Matter discriminants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SystemMode {
    Off = 0,
    Auto = 1,
    Cool = 3,
    Heat = 4,
    EmergencyHeat = 5,
    Precooling = 6,
    FanOnly = 7,
    Dry = 8,
    Sleep = 9,
}

/// Thermostat running mode, meaningful when the device is in Auto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RunningMode {
    Off = 0,
    Cool = 3,
    Heat = 4,
}

/// Control sequence of operation, fixed at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ControlSequenceOfOperation {
    CoolingOnly = 0,
    HeatingOnly = 2,
    CoolingAndHeating = 4,
}

/// Cluster feature flags for a thermostat instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatFeatures {
    pub heating: bool,
    pub cooling: bool,
    pub auto_mode: bool,
}

/// Running state reported to controllers
///
/// Stage 2/3 flags exist in the record shape but stay false: only
/// single-stage devices are bridged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningState {
    pub heat: bool,
    pub cool: bool,
    pub fan: bool,
    pub heat_stage2: bool,
    pub cool_stage2: bool,
    pub fan_stage2: bool,
    pub fan_stage3: bool,
}

impl RunningState {
    pub const ALL_OFF: Self = Self {
        heat: false,
        cool: false,
        fan: false,
        heat_stage2: false,
        cool_stage2: false,
        fan_stage2: false,
        fan_stage3: false,
    };

    pub fn heat() -> Self {
        Self {
            heat: true,
            ..Self::ALL_OFF
        }
    }

    pub fn cool() -> Self {
        Self {
            cool: true,
            ..Self::ALL_OFF
        }
    }

    pub fn fan_only() -> Self {
        Self {
            fan: true,
            ..Self::ALL_OFF
        }
    }

    pub fn dry() -> Self {
        Self {
            heat: true,
            fan: true,
            ..Self::ALL_OFF
        }
    }

    /// Number of primary mode flags currently set (heat/cool)
    pub fn primary_flag_count(&self) -> usize {
        usize::from(self.heat) + usize::from(self.cool)
    }
}

/// Identity of a watched cluster attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeId {
    LocalTemperature,
    SystemMode,
    RunningState,
    RunningMode,
    OccupiedHeatingSetpoint,
    OccupiedCoolingSetpoint,
    MinHeatSetpointLimit,
    MaxHeatSetpointLimit,
    MinCoolSetpointLimit,
    MaxCoolSetpointLimit,
    AbsMinHeatSetpointLimit,
    AbsMaxHeatSetpointLimit,
    AbsMinCoolSetpointLimit,
    AbsMaxCoolSetpointLimit,
    MinSetpointDeadBand,
}

/// Where a cluster write originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOrigin {
    /// Replayed from the synchronizer's own patch application
    Internal,
    /// A live write by a controller or user
    External,
}

/// A committed attribute change, fanned out to cluster observers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeChange {
    pub attribute: AttributeId,
    pub old: serde_json::Value,
    pub new: serde_json::Value,
    pub origin: WriteOrigin,
    pub timestamp: DateTime<Utc>,
}

/// An inbound write notification from the protocol layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterWrite {
    SystemMode {
        old: SystemMode,
        new: SystemMode,
        origin: WriteOrigin,
    },
    OccupiedHeatingSetpoint {
        old: i16,
        new: i16,
        origin: WriteOrigin,
    },
    OccupiedCoolingSetpoint {
        old: i16,
        new: i16,
        origin: WriteOrigin,
    },
}

impl ClusterWrite {
    pub fn origin(&self) -> WriteOrigin {
        match self {
            ClusterWrite::SystemMode { origin, .. }
            | ClusterWrite::OccupiedHeatingSetpoint { origin, .. }
            | ClusterWrite::OccupiedCoolingSetpoint { origin, .. } => *origin,
        }
    }
}

/// Side selector for the setpoint raise/lower command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetpointAdjustMode {
    Heat,
    Cool,
    Both,
}
