//! Entity adapter contract
//!
//! One [`ThermostatAdapter`] instance per exposed device supplies the pure
//! translation functions between the opaque entity snapshot and the domain
//! values the synchronizer works with. Getters read only their snapshot
//! argument; setters are pure constructors of action descriptors and never
//! perform calls themselves.

use crate::actions::HassAction;
use crate::cluster::{RunningMode, SystemMode};
use crate::entity::EntityState;
use crate::temperature::Temperature;

/// Device-type-specific accessors and mutators for a bridged thermostat
pub trait ThermostatAdapter: Send + Sync {
    /// Whether the entity takes a low/high target pair instead of a single
    /// target temperature
    fn supports_temperature_range(&self, entity: &EntityState) -> bool;

    fn min_temperature(&self, entity: &EntityState) -> Option<Temperature>;
    fn max_temperature(&self, entity: &EntityState) -> Option<Temperature>;
    fn current_temperature(&self, entity: &EntityState) -> Option<Temperature>;
    fn target_heating_temperature(&self, entity: &EntityState) -> Option<Temperature>;
    fn target_cooling_temperature(&self, entity: &EntityState) -> Option<Temperature>;

    fn system_mode(&self, entity: &EntityState) -> SystemMode;
    fn running_mode(&self, entity: &EntityState) -> RunningMode;

    fn set_system_mode(&self, mode: SystemMode) -> HassAction;
    fn set_target_temperature(&self, target: Temperature) -> HassAction;
    fn set_target_temperature_range(&self, low: Temperature, high: Temperature) -> HassAction;
}

/// Adapter for standard Home Assistant `climate` entities
pub struct ClimateAdapter {
    entity_id: String,
}

impl ClimateAdapter {
    pub fn new<S: Into<String>>(entity_id: S) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }

    fn attr_temperature(entity: &EntityState, key: &str) -> Option<Temperature> {
        entity.attr_f64(key).and_then(Temperature::celsius)
    }
}

impl ThermostatAdapter for ClimateAdapter {
    fn supports_temperature_range(&self, entity: &EntityState) -> bool {
        entity.attributes.contains_key("target_temp_low")
            && entity.attributes.contains_key("target_temp_high")
    }

    fn min_temperature(&self, entity: &EntityState) -> Option<Temperature> {
        Self::attr_temperature(entity, "min_temp")
    }

    fn max_temperature(&self, entity: &EntityState) -> Option<Temperature> {
        Self::attr_temperature(entity, "max_temp")
    }

    fn current_temperature(&self, entity: &EntityState) -> Option<Temperature> {
        Self::attr_temperature(entity, "current_temperature")
    }

    fn target_heating_temperature(&self, entity: &EntityState) -> Option<Temperature> {
        Self::attr_temperature(entity, "target_temp_low")
            .or_else(|| Self::attr_temperature(entity, "temperature"))
    }

    fn target_cooling_temperature(&self, entity: &EntityState) -> Option<Temperature> {
        Self::attr_temperature(entity, "target_temp_high")
            .or_else(|| Self::attr_temperature(entity, "temperature"))
    }

    fn system_mode(&self, entity: &EntityState) -> SystemMode {
        match entity.state.as_str() {
            "heat" => SystemMode::Heat,
            "cool" => SystemMode::Cool,
            "heat_cool" | "auto" => SystemMode::Auto,
            "dry" => SystemMode::Dry,
            "fan_only" => SystemMode::FanOnly,
            _ => SystemMode::Off,
        }
    }

    fn running_mode(&self, entity: &EntityState) -> RunningMode {
        match entity.attr_str("hvac_action") {
            Some("heating" | "preheating") => RunningMode::Heat,
            Some("cooling") => RunningMode::Cool,
            _ => RunningMode::Off,
        }
    }

    fn set_system_mode(&self, mode: SystemMode) -> HassAction {
        let hvac_mode = match mode {
            SystemMode::Heat | SystemMode::EmergencyHeat => "heat",
            SystemMode::Cool | SystemMode::Precooling => "cool",
            SystemMode::Auto => "heat_cool",
            SystemMode::Dry => "dry",
            SystemMode::FanOnly => "fan_only",
            SystemMode::Off | SystemMode::Sleep => "off",
        };
        HassAction::set_hvac_mode(&self.entity_id, hvac_mode)
    }

    fn set_target_temperature(&self, target: Temperature) -> HassAction {
        HassAction::set_temperature(&self.entity_id, target.to_celsius())
    }

    fn set_target_temperature_range(&self, low: Temperature, high: Temperature) -> HassAction {
        HassAction::set_temperature_range(&self.entity_id, low.to_celsius(), high.to_celsius())
    }
}
