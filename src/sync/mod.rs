//! Bidirectional thermostat state synchronization
//!
//! One [`ThermostatSynchronizer`] per bridged device owns that device's
//! cluster state and reconciles the two directions of change:
//!
//! - entity → cluster: each snapshot is reduced through the adapter and the
//!   pure resolvers into a single feature-scoped patch, applied atomically.
//! - cluster → entity: live attribute writes and the raise/lower command are
//!   translated into adapter actions and dispatched fire-and-forget.
//!
//! Every committed patch fans out with internal provenance, and the write
//! handlers drop internal-origin notifications on the floor, which is what
//! keeps the two directions from feeding each other forever.

use crate::actions::ActionDispatcher;
use crate::adapter::ThermostatAdapter;
use crate::cluster::{
    resolve_running_state, AttributeChange, ClusterWrite, SetpointAdjustMode, SystemMode,
    ThermostatClusterState, ThermostatFeatures, ThermostatPatch, WriteOrigin,
};
use crate::config::ThermostatDefaults;
use crate::constraints::resolve_setpoint_limits;
use crate::entity::EntityState;
use crate::temperature::Temperature;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Events consumed by a synchronizer's run loop
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The external integration pushed a fresh entity snapshot
    EntityUpdated(EntityState),
    /// The protocol layer committed an attribute write
    AttributeWritten(ClusterWrite),
    /// Relative setpoint adjustment command, amount in thousandths of a
    /// degree Celsius
    SetpointRaiseLower {
        mode: SetpointAdjustMode,
        amount: i32,
    },
}

/// Bidirectional state synchronizer for one thermostat device instance
pub struct ThermostatSynchronizer {
    entity_id: String,
    adapter: Arc<dyn ThermostatAdapter>,
    dispatcher: Arc<dyn ActionDispatcher>,
    defaults: ThermostatDefaults,
    cluster: ThermostatClusterState,
    last_entity: Option<EntityState>,
    change_tx: broadcast::Sender<AttributeChange>,
}

impl ThermostatSynchronizer {
    pub fn new(
        entity_id: impl Into<String>,
        features: ThermostatFeatures,
        defaults: ThermostatDefaults,
        adapter: Arc<dyn ThermostatAdapter>,
        dispatcher: Arc<dyn ActionDispatcher>,
    ) -> Self {
        let (change_tx, _) = broadcast::channel(64);
        Self {
            entity_id: entity_id.into(),
            adapter,
            dispatcher,
            defaults,
            cluster: ThermostatClusterState::new(features, &defaults),
            last_entity: None,
            change_tx,
        }
    }

    /// Current cluster state
    pub fn cluster(&self) -> &ThermostatClusterState {
        &self.cluster
    }

    /// Subscribe to committed attribute changes
    pub fn subscribe(&self) -> broadcast::Receiver<AttributeChange> {
        self.change_tx.subscribe()
    }

    /// Consume events until the channel closes
    ///
    /// Handlers run to completion one at a time, so patches are never
    /// interleaved with write handling for the same device.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SyncEvent>) {
        info!("Starting thermostat synchronizer for {}", self.entity_id);
        while let Some(event) = events.recv().await {
            match event {
                SyncEvent::EntityUpdated(entity) => self.handle_entity_update(entity),
                SyncEvent::AttributeWritten(write) => self.handle_attribute_write(write).await,
                SyncEvent::SetpointRaiseLower { mode, amount } => {
                    self.handle_setpoint_raise_lower(mode, amount).await
                }
            }
        }
        debug!("Event channel closed, stopping synchronizer for {}", self.entity_id);
    }

    /// Entity → cluster: derive and apply the attribute patch for a snapshot
    ///
    /// Reads only the adapter and cluster state, never dispatches actions,
    /// and cannot fail: absent adapter values fall back to the prior cluster
    /// values.
    pub fn handle_entity_update(&mut self, entity: EntityState) {
        let features = self.cluster.features();
        let adapter = Arc::clone(&self.adapter);

        let reported_min = adapter.min_temperature(&entity).map(|t| t.to_centicelsius());
        let reported_max = adapter.max_temperature(&entity).map(|t| t.to_centicelsius());
        let local_temperature = adapter
            .current_temperature(&entity)
            .map(|t| t.to_centicelsius());
        let target_heating = adapter
            .target_heating_temperature(&entity)
            .map(|t| t.to_centicelsius())
            .unwrap_or(self.cluster.occupied_heating_setpoint);
        let target_cooling = adapter
            .target_cooling_temperature(&entity)
            .map(|t| t.to_centicelsius())
            .unwrap_or(self.cluster.occupied_cooling_setpoint);

        let system_mode = self.effective_system_mode(adapter.system_mode(&entity));
        let running_mode = adapter.running_mode(&entity);

        let limits = resolve_setpoint_limits(reported_min, &self.defaults);
        let running_state = resolve_running_state(system_mode, running_mode);

        let mut patch = ThermostatPatch {
            local_temperature,
            system_mode: Some(system_mode),
            running_state: Some(running_state),
            min_setpoint_dead_band: Some(limits.dead_band),
            ..Default::default()
        };
        if features.heating {
            patch.occupied_heating_setpoint = Some(target_heating);
            patch.min_heat_setpoint_limit = Some(limits.min_heat);
            patch.max_heat_setpoint_limit = reported_max;
            patch.abs_min_heat_setpoint_limit = Some(limits.min_heat);
            patch.abs_max_heat_setpoint_limit = reported_max;
        }
        if features.cooling {
            patch.occupied_cooling_setpoint = Some(target_cooling);
            patch.min_cool_setpoint_limit = Some(limits.min_cool);
            patch.max_cool_setpoint_limit = reported_max;
            patch.abs_min_cool_setpoint_limit = Some(limits.min_cool);
            patch.abs_max_cool_setpoint_limit = reported_max;
        }
        if features.auto_mode {
            patch.running_mode = Some(running_mode);
        }

        let changes = self.cluster.apply_patch(&patch);
        debug!(
            "Applied entity update for {}: {} attribute(s) changed",
            entity.entity_id,
            changes.len()
        );
        self.last_entity = Some(entity);
        self.broadcast(changes);
    }

    /// Cluster → entity: react to a committed attribute write
    ///
    /// Internal-origin writes are replays of our own patch application and
    /// return immediately without touching the external integration.
    pub async fn handle_attribute_write(&mut self, write: ClusterWrite) {
        if write.origin() == WriteOrigin::Internal {
            debug!("Ignoring internally-originated write for {}", self.entity_id);
            return;
        }

        self.cluster.record_write(&write);

        match write {
            ClusterWrite::SystemMode { new, .. } => {
                let action = self.adapter.set_system_mode(new);
                self.dispatch(action).await;
            }
            ClusterWrite::OccupiedHeatingSetpoint { new, .. } => {
                let low = Temperature::centicelsius(new);
                let high = Temperature::centicelsius(self.cluster.occupied_cooling_setpoint);
                self.set_temperature(low, high, SetpointAdjustMode::Heat)
                    .await;
            }
            ClusterWrite::OccupiedCoolingSetpoint { new, .. } => {
                let low = Temperature::centicelsius(self.cluster.occupied_heating_setpoint);
                let high = Temperature::centicelsius(new);
                self.set_temperature(low, high, SetpointAdjustMode::Cool)
                    .await;
            }
        }
    }

    /// Relative raise/lower command from a controller or physical control
    ///
    /// `amount` is in thousandths of a degree Celsius. With no adapter
    /// target on either side this is a no-op.
    pub async fn handle_setpoint_raise_lower(&mut self, mode: SetpointAdjustMode, amount: i32) {
        let Some(entity) = self.last_entity.clone() else {
            debug!("No entity snapshot yet, ignoring setpoint adjustment");
            return;
        };

        let heat = self.adapter.target_heating_temperature(&entity);
        let cool = self.adapter.target_cooling_temperature(&entity);
        let heat = heat.or(cool);
        let cool = cool.or(heat);
        let (Some(heat), Some(cool)) = (heat, cool) else {
            debug!("No target temperatures reported, ignoring setpoint adjustment");
            return;
        };

        let delta = f64::from(amount) / 1000.0;
        let adjusted_cool = if mode != SetpointAdjustMode::Heat {
            cool.plus(delta)
        } else {
            cool
        };
        let adjusted_heat = if mode != SetpointAdjustMode::Cool {
            heat.plus(delta)
        } else {
            heat
        };

        self.set_temperature(adjusted_heat, adjusted_cool, mode).await;
    }

    /// Downgrade Auto deterministically when the instance lacks auto-mode
    fn effective_system_mode(&self, reported: SystemMode) -> SystemMode {
        let features = self.cluster.features();
        if reported != SystemMode::Auto || features.auto_mode {
            return reported;
        }
        if features.heating {
            SystemMode::Heat
        } else if features.cooling {
            SystemMode::Cool
        } else {
            SystemMode::Sleep
        }
    }

    async fn set_temperature(&self, low: Temperature, high: Temperature, mode: SetpointAdjustMode) {
        let supports_range = self
            .last_entity
            .as_ref()
            .map(|entity| self.adapter.supports_temperature_range(entity))
            .unwrap_or(false);

        let action = if supports_range {
            self.adapter.set_target_temperature_range(low, high)
        } else {
            let single = if mode == SetpointAdjustMode::Heat {
                low
            } else {
                high
            };
            self.adapter.set_target_temperature(single)
        };
        self.dispatch(action).await;
    }

    async fn dispatch(&self, action: crate::actions::HassAction) {
        if let Err(e) = self.dispatcher.call_action(action).await {
            warn!("Action dispatch for {} failed: {}", self.entity_id, e);
        }
    }

    fn broadcast(&self, changes: Vec<AttributeChange>) {
        for change in changes {
            if let Err(e) = self.change_tx.send(change) {
                debug!("No cluster observers attached: {}", e);
            }
        }
    }
}

/// Spawn a synchronizer task and return its event sender
///
/// The task ends, and its subscriptions with it, when the sender is dropped.
pub fn spawn_synchronizer(
    synchronizer: ThermostatSynchronizer,
) -> (mpsc::UnboundedSender<SyncEvent>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(synchronizer.run(rx));
    (tx, handle)
}
