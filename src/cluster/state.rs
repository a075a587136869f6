//! Thermostat cluster state and atomic patch application
//!
//! The synchronizer is the only writer. A [`ThermostatPatch`] is applied
//! all-or-nothing against a working copy, so observers never read a torn
//! intermediate between individual field writes, and the returned deltas
//! reflect exactly what changed.

use super::{
    AttributeChange, AttributeId, ClusterWrite, ControlSequenceOfOperation, RunningMode,
    RunningState, SystemMode, ThermostatFeatures, WriteOrigin,
};
use crate::config::ThermostatDefaults;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Matter default occupied heating setpoint (20°C)
const DEFAULT_HEATING_SETPOINT: i16 = 2000;

/// Matter default occupied cooling setpoint (26°C)
const DEFAULT_COOLING_SETPOINT: i16 = 2600;

/// Matter default absolute maximum heat setpoint (30°C)
const DEFAULT_MAX_HEAT_LIMIT: i16 = 3000;

/// Matter default absolute maximum cool setpoint (32°C)
const DEFAULT_MAX_COOL_LIMIT: i16 = 3200;

/// Cluster state of one bridged thermostat instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermostatClusterState {
    features: ThermostatFeatures,
    control_sequence_of_operation: ControlSequenceOfOperation,

    pub local_temperature: Option<i16>,
    pub system_mode: SystemMode,
    pub running_state: RunningState,
    pub running_mode: RunningMode,

    pub occupied_heating_setpoint: i16,
    pub occupied_cooling_setpoint: i16,

    pub min_heat_setpoint_limit: i16,
    pub max_heat_setpoint_limit: i16,
    pub min_cool_setpoint_limit: i16,
    pub max_cool_setpoint_limit: i16,

    pub abs_min_heat_setpoint_limit: i16,
    pub abs_max_heat_setpoint_limit: i16,
    pub abs_min_cool_setpoint_limit: i16,
    pub abs_max_cool_setpoint_limit: i16,

    pub min_setpoint_dead_band: i16,
}

/// Pending multi-field update, built per entity notification
///
/// `None` fields are left untouched on application. Builders omit an entire
/// feature's fields when that feature is unsupported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermostatPatch {
    pub local_temperature: Option<i16>,
    pub system_mode: Option<SystemMode>,
    pub running_state: Option<RunningState>,
    pub running_mode: Option<RunningMode>,
    pub occupied_heating_setpoint: Option<i16>,
    pub occupied_cooling_setpoint: Option<i16>,
    pub min_heat_setpoint_limit: Option<i16>,
    pub max_heat_setpoint_limit: Option<i16>,
    pub min_cool_setpoint_limit: Option<i16>,
    pub max_cool_setpoint_limit: Option<i16>,
    pub abs_min_heat_setpoint_limit: Option<i16>,
    pub abs_max_heat_setpoint_limit: Option<i16>,
    pub abs_min_cool_setpoint_limit: Option<i16>,
    pub abs_max_cool_setpoint_limit: Option<i16>,
    pub min_setpoint_dead_band: Option<i16>,
}

/// Clamp a setpoint into contradictory-tolerant bounds
///
/// A reported minimum above the absolute maximum must not panic mid-patch;
/// the lower bound wins so the deadband ordering stays intact.
fn clamp_setpoint(value: i16, min: i16, max: i16) -> i16 {
    if min > max {
        min
    } else {
        value.clamp(min, max)
    }
}

impl ThermostatClusterState {
    /// Initialize cluster state for a device instance
    ///
    /// The control sequence is derived from the feature flags here and never
    /// written again. Default limits already satisfy the deadband ordering
    /// so the instance is protocol-valid before the first entity update.
    pub fn new(features: ThermostatFeatures, defaults: &ThermostatDefaults) -> Self {
        let control_sequence = if features.cooling && features.heating {
            ControlSequenceOfOperation::CoolingAndHeating
        } else if features.cooling {
            ControlSequenceOfOperation::CoolingOnly
        } else {
            ControlSequenceOfOperation::HeatingOnly
        };

        let min_heat = defaults.min_setpoint;
        let min_cool = defaults.min_setpoint.saturating_add(defaults.dead_band);

        Self {
            features,
            control_sequence_of_operation: control_sequence,
            local_temperature: None,
            system_mode: SystemMode::Off,
            running_state: RunningState::ALL_OFF,
            running_mode: RunningMode::Off,
            occupied_heating_setpoint: DEFAULT_HEATING_SETPOINT,
            occupied_cooling_setpoint: DEFAULT_COOLING_SETPOINT,
            min_heat_setpoint_limit: min_heat,
            max_heat_setpoint_limit: DEFAULT_MAX_HEAT_LIMIT,
            min_cool_setpoint_limit: min_cool,
            max_cool_setpoint_limit: DEFAULT_MAX_COOL_LIMIT,
            abs_min_heat_setpoint_limit: min_heat,
            abs_max_heat_setpoint_limit: DEFAULT_MAX_HEAT_LIMIT,
            abs_min_cool_setpoint_limit: min_cool,
            abs_max_cool_setpoint_limit: DEFAULT_MAX_COOL_LIMIT,
            min_setpoint_dead_band: defaults.dead_band,
        }
    }

    pub fn features(&self) -> ThermostatFeatures {
        self.features
    }

    pub fn control_sequence_of_operation(&self) -> ControlSequenceOfOperation {
        self.control_sequence_of_operation
    }

    /// Apply a patch atomically and return the committed deltas
    ///
    /// Occupied setpoints are clamped into the (possibly also patched)
    /// absolute bounds before the diff, so a single application can never
    /// leave a setpoint outside its limits. An unchanged patch yields an
    /// empty delta list.
    pub fn apply_patch(&mut self, patch: &ThermostatPatch) -> Vec<AttributeChange> {
        let mut next = self.clone();

        macro_rules! merge {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    next.$field = value;
                }
            };
        }

        merge!(system_mode);
        merge!(running_state);
        merge!(running_mode);
        merge!(occupied_heating_setpoint);
        merge!(occupied_cooling_setpoint);
        merge!(min_heat_setpoint_limit);
        merge!(max_heat_setpoint_limit);
        merge!(min_cool_setpoint_limit);
        merge!(max_cool_setpoint_limit);
        merge!(abs_min_heat_setpoint_limit);
        merge!(abs_max_heat_setpoint_limit);
        merge!(abs_min_cool_setpoint_limit);
        merge!(abs_max_cool_setpoint_limit);
        merge!(min_setpoint_dead_band);
        if let Some(value) = patch.local_temperature {
            next.local_temperature = Some(value);
        }

        next.occupied_heating_setpoint = clamp_setpoint(
            next.occupied_heating_setpoint,
            next.abs_min_heat_setpoint_limit,
            next.abs_max_heat_setpoint_limit,
        );
        next.occupied_cooling_setpoint = clamp_setpoint(
            next.occupied_cooling_setpoint,
            next.abs_min_cool_setpoint_limit,
            next.abs_max_cool_setpoint_limit,
        );

        let changes = self.diff(&next);
        *self = next;
        changes
    }

    /// Commit a live protocol-layer write into cluster state
    ///
    /// Keeps paired-setpoint reads fresh while the cluster→external handler
    /// is still running.
    pub fn record_write(&mut self, write: &ClusterWrite) {
        match *write {
            ClusterWrite::SystemMode { new, .. } => self.system_mode = new,
            ClusterWrite::OccupiedHeatingSetpoint { new, .. } => {
                self.occupied_heating_setpoint = new;
            }
            ClusterWrite::OccupiedCoolingSetpoint { new, .. } => {
                self.occupied_cooling_setpoint = new;
            }
        }
    }

    /// Whether the deadband ordering constraint currently holds
    pub fn limits_consistent(&self) -> bool {
        if self.features.heating && self.features.cooling {
            self.min_heat_setpoint_limit
                .saturating_add(self.min_setpoint_dead_band)
                <= self.min_cool_setpoint_limit
        } else {
            true
        }
    }

    fn diff(&self, next: &Self) -> Vec<AttributeChange> {
        let now = Utc::now();
        let mut changes = Vec::new();

        macro_rules! record {
            ($attr:expr, $field:ident) => {
                if self.$field != next.$field {
                    changes.push(AttributeChange {
                        attribute: $attr,
                        old: json!(self.$field),
                        new: json!(next.$field),
                        origin: WriteOrigin::Internal,
                        timestamp: now,
                    });
                }
            };
        }

        record!(AttributeId::LocalTemperature, local_temperature);
        record!(AttributeId::SystemMode, system_mode);
        record!(AttributeId::RunningState, running_state);
        record!(AttributeId::RunningMode, running_mode);
        record!(AttributeId::OccupiedHeatingSetpoint, occupied_heating_setpoint);
        record!(AttributeId::OccupiedCoolingSetpoint, occupied_cooling_setpoint);
        record!(AttributeId::MinHeatSetpointLimit, min_heat_setpoint_limit);
        record!(AttributeId::MaxHeatSetpointLimit, max_heat_setpoint_limit);
        record!(AttributeId::MinCoolSetpointLimit, min_cool_setpoint_limit);
        record!(AttributeId::MaxCoolSetpointLimit, max_cool_setpoint_limit);
        record!(AttributeId::AbsMinHeatSetpointLimit, abs_min_heat_setpoint_limit);
        record!(AttributeId::AbsMaxHeatSetpointLimit, abs_max_heat_setpoint_limit);
        record!(AttributeId::AbsMinCoolSetpointLimit, abs_min_cool_setpoint_limit);
        record!(AttributeId::AbsMaxCoolSetpointLimit, abs_max_cool_setpoint_limit);
        record!(AttributeId::MinSetpointDeadBand, min_setpoint_dead_band);

        changes
    }
}
