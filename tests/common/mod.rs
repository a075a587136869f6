//! Shared fixtures for synchronizer integration tests

use hass_matter_bridge::{
    ChannelDispatcher, ClimateAdapter, EntityState, HassAction, ThermostatDefaults,
    ThermostatFeatures, ThermostatSynchronizer,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub const TEST_ENTITY_ID: &str = "climate.living_room";

/// Entity snapshot for a heat/cool range thermostat
pub fn range_entity() -> EntityState {
    EntityState::new(TEST_ENTITY_ID, "heat_cool")
        .with_attr("current_temperature", 21.0)
        .with_attr("target_temp_low", 20.0)
        .with_attr("target_temp_high", 22.0)
        .with_attr("min_temp", 15.0)
        .with_attr("hvac_action", "idle")
}

/// Entity snapshot for a single-target heating thermostat
pub fn single_target_entity() -> EntityState {
    EntityState::new(TEST_ENTITY_ID, "heat")
        .with_attr("current_temperature", 20.5)
        .with_attr("temperature", 21.0)
        .with_attr("min_temp", 15.0)
        .with_attr("hvac_action", "heating")
}

pub fn all_features() -> ThermostatFeatures {
    ThermostatFeatures {
        heating: true,
        cooling: true,
        auto_mode: true,
    }
}

/// Build a synchronizer over a [`ClimateAdapter`] and a channel dispatcher,
/// returning the receiving end of the action queue for assertions
pub fn build_synchronizer(
    features: ThermostatFeatures,
) -> (ThermostatSynchronizer, UnboundedReceiver<HassAction>) {
    let (dispatcher, actions) = ChannelDispatcher::new();
    let synchronizer = ThermostatSynchronizer::new(
        TEST_ENTITY_ID,
        features,
        ThermostatDefaults::default(),
        Arc::new(ClimateAdapter::new(TEST_ENTITY_ID)),
        Arc::new(dispatcher),
    );
    (synchronizer, actions)
}
