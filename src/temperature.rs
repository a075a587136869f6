//! Temperature value handling
//!
//! [`Temperature`] is the shared currency between the entity model and the
//! cluster model: an immutable magnitude tagged with its unit. All transforms
//! return new values; equality and ordering are defined after normalizing to
//! protocol-native centi-degrees Celsius, which is the lossy bottleneck both
//! sides agree on (±0.01°C).

use serde::{Deserialize, Serialize};

/// Unit of a temperature value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    /// Protocol-native hundredths of a degree Celsius
    Centicelsius,
}

/// Immutable temperature value with a defined unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Temperature {
    value: f64,
    unit: TemperatureUnit,
}

impl Temperature {
    /// Create a temperature from degrees Celsius
    ///
    /// Returns `None` for non-finite input, mirroring an entity that
    /// reported garbage.
    pub fn celsius(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self {
            value,
            unit: TemperatureUnit::Celsius,
        })
    }

    /// Create a temperature from degrees Fahrenheit
    pub fn fahrenheit(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self {
            value,
            unit: TemperatureUnit::Fahrenheit,
        })
    }

    /// Create a temperature from protocol-native centi-degrees Celsius
    pub fn centicelsius(value: i16) -> Self {
        Self {
            value: value as f64,
            unit: TemperatureUnit::Centicelsius,
        }
    }

    /// Value in degrees Celsius
    pub fn to_celsius(&self) -> f64 {
        match self.unit {
            TemperatureUnit::Celsius => self.value,
            TemperatureUnit::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Centicelsius => self.value / 100.0,
        }
    }

    /// Value in protocol-native centi-degrees Celsius, rounded to the
    /// nearest hundredth of a degree
    pub fn to_centicelsius(&self) -> i16 {
        (self.to_celsius() * 100.0).round() as i16
    }

    /// Return a new temperature raised (or lowered) by `delta` degrees
    /// Celsius
    pub fn plus(&self, delta: f64) -> Self {
        Self {
            value: self.to_celsius() + delta,
            unit: TemperatureUnit::Celsius,
        }
    }
}

impl PartialEq for Temperature {
    fn eq(&self, other: &Self) -> bool {
        self.to_centicelsius() == other.to_centicelsius()
    }
}

impl PartialOrd for Temperature {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.to_centicelsius().cmp(&other.to_centicelsius()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_celsius_round_trip() {
        let t = Temperature::celsius(21.5).unwrap();
        assert_eq!(t.to_centicelsius(), 2150);
        assert_eq!(Temperature::centicelsius(2150).to_celsius(), 21.5);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let t = Temperature::fahrenheit(68.0).unwrap();
        assert_eq!(t.to_centicelsius(), 2000);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Temperature::celsius(f64::NAN).is_none());
        assert!(Temperature::celsius(f64::INFINITY).is_none());
        assert!(Temperature::fahrenheit(f64::NAN).is_none());
    }

    #[test]
    fn test_plus_returns_new_value() {
        let base = Temperature::celsius(22.0).unwrap();
        let raised = base.plus(0.5);
        assert_eq!(base.to_centicelsius(), 2200);
        assert_eq!(raised.to_centicelsius(), 2250);
    }

    #[test]
    fn test_comparison_across_units() {
        let c = Temperature::celsius(20.0).unwrap();
        let f = Temperature::fahrenheit(68.0).unwrap();
        assert_eq!(c, f);
        assert!(c < Temperature::centicelsius(2001));
    }

    #[test]
    fn test_centicelsius_rounding_tolerance() {
        // 21.004°C and 20.996°C both round to 2100
        assert_eq!(Temperature::celsius(21.004).unwrap().to_centicelsius(), 2100);
        assert_eq!(Temperature::celsius(20.996).unwrap().to_centicelsius(), 2100);
    }
}
