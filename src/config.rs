//! Bridge configuration
//!
//! Default values that used to live inline in the thermostat initialization
//! logic are named here so they can be overridden per device and tested in
//! isolation.

use serde::{Deserialize, Serialize};

/// Default minimum separation between heating and cooling setpoints,
/// in centi-degrees Celsius (0.5°C)
pub const DEFAULT_DEAD_BAND: i16 = 50;

/// Default minimum setpoint when the entity reports no lower bound,
/// in centi-degrees Celsius (16°C)
pub const DEFAULT_MIN_SETPOINT: i16 = 1600;

/// Per-device thermostat defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThermostatDefaults {
    /// Minimum heat/cool setpoint separation in centi-degrees Celsius
    pub dead_band: i16,

    /// Fallback minimum setpoint in centi-degrees Celsius
    pub min_setpoint: i16,
}

impl Default for ThermostatDefaults {
    fn default() -> Self {
        Self {
            dead_band: DEFAULT_DEAD_BAND,
            min_setpoint: DEFAULT_MIN_SETPOINT,
        }
    }
}
