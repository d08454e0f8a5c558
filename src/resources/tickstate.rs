//! Per-tick working record.
//!
//! [`TickState`] is inserted into the engine world by `begin_tick` and removed
//! by `end_tick`; outside a tick there is no `TickState` to read.
use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

use crate::resources::hostframe::HostFrame;
use crate::resources::input::PlayerInput;
use crate::resources::rotation::Orientation;
use crate::resources::snapshot::NetworkSnapshot;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TickState {
    pub tick: u64,
    /// Identity of the simulated entity. Only meaningful during this tick.
    pub entity: Option<Entity>,
    /// Input flags after the `MovementInput` stage.
    pub input: PlayerInput,
    pub forward: f32,
    pub sideways: f32,
    pub sprint_intent: bool,
    /// Snapshot the interceptor handed to the host, once captured.
    pub pre_snapshot: Option<NetworkSnapshot>,
    /// What the host reports it sent.
    pub sent: Option<NetworkSnapshot>,
}

impl TickState {
    /// Working values reset to the host's raw input.
    pub fn begin(tick: u64, frame: &HostFrame) -> Self {
        Self {
            tick,
            entity: frame.entity,
            input: frame.input,
            forward: frame.input.directional.forward_multiplier(),
            sideways: frame.input.directional.sideways_multiplier(),
            sprint_intent: false,
            pre_snapshot: None,
            sent: None,
        }
    }

    pub fn output(&self, rendered: Orientation, transmitted: Orientation) -> MovementOutput {
        MovementOutput {
            tick: self.tick,
            forward: self.forward,
            sideways: self.sideways,
            jump: self.input.jump,
            sneak: self.input.sneak,
            sprinting: self.sprint_intent,
            rendered,
            transmitted,
        }
    }
}

/// Movement values the host applies after the input stages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MovementOutput {
    pub tick: u64,
    pub forward: f32,
    pub sideways: f32,
    pub jump: bool,
    pub sneak: bool,
    pub sprinting: bool,
    /// Orientation to render.
    pub rendered: Orientation,
    /// Orientation the network path will carry.
    pub transmitted: Orientation,
}
