//! Setpoint limit resolution
//!
//! The protocol rejects any state where the heating and cooling limits sit
//! closer together than the deadband. This resolver turns whatever lower
//! bound the entity reports (or no bound at all) into a triple that always
//! satisfies `min_heat + dead_band <= min_cool`.

use crate::config::ThermostatDefaults;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Consistent lower setpoint limits for a thermostat instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetpointLimits {
    /// Minimum heating setpoint in centi-degrees Celsius
    pub min_heat: i16,

    /// Minimum cooling setpoint in centi-degrees Celsius
    pub min_cool: i16,

    /// Heat/cool separation in centi-degrees Celsius
    pub dead_band: i16,
}

impl SetpointLimits {
    /// Whether the protocol's ordering constraint holds
    pub fn is_consistent(&self) -> bool {
        self.min_heat.saturating_add(self.dead_band) <= self.min_cool
    }
}

/// Resolve cluster-valid setpoint limits from a reported lower bound
///
/// Never fails: an absent bound falls back to the configured default
/// minimum, and contradictory intermediate results are force-corrected.
pub fn resolve_setpoint_limits(
    reported_min: Option<i16>,
    defaults: &ThermostatDefaults,
) -> SetpointLimits {
    let dead_band = defaults.dead_band;
    let min_heat = reported_min.unwrap_or(defaults.min_setpoint);
    let mut min_cool = min_heat;

    // Saturating: a reported minimum near i16::MAX must degrade, not panic
    let required_min_cool = min_heat.saturating_add(dead_band);
    if min_cool < required_min_cool {
        min_cool = required_min_cool;
    }

    let mut limits = SetpointLimits {
        min_heat,
        min_cool,
        dead_band,
    };

    // Unreachable given the raise above; re-asserted anyway because a
    // violated limit pair would be rejected by the protocol layer.
    if !limits.is_consistent() {
        error!(
            "Setpoint limit constraint violated after adjustment: {} <= {} - {}",
            limits.min_heat, limits.min_cool, limits.dead_band
        );
        limits.min_cool = limits.min_heat.saturating_add(limits.dead_band);
        warn!("Forced min_cool to {}", limits.min_cool);
    }

    limits
}
