//! Movement extension points.
//!
//! Fired in this order by the input stages of the tick:
//!
//! 1. [`MovementInputEvent`] – replace the directional keys, jump or sneak
//! 2. [`RotatedMovementInputEvent`] – replace the (possibly rotated) multipliers
//! 3. [`MovementVetoEvent`] – force an axis to zero; cannot be undone
//! 4. [`SneakMultiplierEvent`] / [`UseMultiplierEvent`] – slowdown factors,
//!    only fired when the host reports sneaking / an item in use
//! 5. [`SprintEvent`] – final sprint intent
//!
//! [`PushOutEvent`] and [`MoveEvent`] fire from the host physics step.
use serde::{Deserialize, Serialize};

use crate::events::slot::ResultSlot;
use crate::resources::input::{DirectionalInput, PlayerInput};
use crate::resources::rotation::Orientation;
use crate::resources::snapshot::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct MovementInputEvent {
    pub directional: ResultSlot<DirectionalInput>,
    pub jump: ResultSlot<bool>,
    pub sneak: ResultSlot<bool>,
    pub cancelled: bool,
}

impl MovementInputEvent {
    pub fn new(input: &PlayerInput) -> Self {
        Self {
            directional: ResultSlot::new(input.directional),
            jump: ResultSlot::new(input.jump),
            sneak: ResultSlot::new(input.sneak),
            cancelled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotatedMovementInputEvent {
    pub forward: ResultSlot<f32>,
    pub sideways: ResultSlot<f32>,
    /// Orientation shown this tick (the resolved one under `change_look`).
    pub rendered: Orientation,
    /// Resolved orientation of the tick, `None` in passthrough.
    pub resolved: Option<Orientation>,
    /// Whether the values were rotated by the aim fix-up.
    pub fixed_up: bool,
    pub cancelled: bool,
}

impl RotatedMovementInputEvent {
    pub fn new(
        forward: f32,
        sideways: f32,
        rendered: Orientation,
        resolved: Option<Orientation>,
        fixed_up: bool,
    ) -> Self {
        Self {
            forward: ResultSlot::new(forward),
            sideways: ResultSlot::new(sideways),
            rendered,
            resolved,
            fixed_up,
            cancelled: false,
        }
    }
}

/// Zeroing vetoes. Once set, a veto stays set for the rest of the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementVetoEvent {
    pub forward: f32,
    pub sideways: f32,
    stop_forward: bool,
    stop_sideways: bool,
}

impl MovementVetoEvent {
    pub fn new(forward: f32, sideways: f32) -> Self {
        Self {
            forward,
            sideways,
            stop_forward: false,
            stop_sideways: false,
        }
    }

    pub fn stop_forward(&mut self) {
        self.stop_forward = true;
    }

    pub fn stop_sideways(&mut self) {
        self.stop_sideways = true;
    }

    pub fn forward_stopped(&self) -> bool {
        self.stop_forward
    }

    pub fn sideways_stopped(&self) -> bool {
        self.stop_sideways
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SneakMultiplierEvent {
    pub multiplier: ResultSlot<f32>,
    pub cancelled: bool,
}

impl SneakMultiplierEvent {
    pub fn new(multiplier: f32) -> Self {
        Self {
            multiplier: ResultSlot::new(multiplier),
            cancelled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UseMultiplierEvent {
    pub forward: ResultSlot<f32>,
    pub sideways: ResultSlot<f32>,
    pub cancelled: bool,
}

impl UseMultiplierEvent {
    pub fn new(forward: f32, sideways: f32) -> Self {
        Self {
            forward: ResultSlot::new(forward),
            sideways: ResultSlot::new(sideways),
            cancelled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprintEvent {
    pub intent: ResultSlot<bool>,
    /// Forward multiplier above the movement epsilon.
    pub has_forward_movement: bool,
    /// Host's notion of walking: forward at walking speed, or any movement
    /// while submerged.
    pub walking: bool,
    /// Walking in any direction.
    pub omni_walking: bool,
    pub submerged: bool,
    pub cancelled: bool,
}

impl SprintEvent {
    /// Derive the host's walking predicates from the final multipliers.
    ///
    /// The initial intent is what the host would do on its own: sprint key
    /// held and walking.
    pub fn new(
        forward: f32,
        sideways: f32,
        sprint_key: bool,
        submerged: bool,
        walking_threshold: f32,
        epsilon: f32,
    ) -> Self {
        let moving = |v: f32| v.abs() > epsilon;
        let at_speed = |v: f32| v.abs() >= walking_threshold;
        let has_forward_movement = forward > epsilon;
        let walking = if submerged {
            has_forward_movement
        } else {
            forward >= walking_threshold
        };
        let omni_walking = if submerged {
            moving(forward) || moving(sideways)
        } else {
            at_speed(forward) || at_speed(sideways)
        };
        Self {
            intent: ResultSlot::new(sprint_key && walking),
            has_forward_movement,
            walking,
            omni_walking,
            submerged,
            cancelled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushOutEvent {
    pub x: f64,
    pub z: f64,
    pub cancelled: bool,
}

impl PushOutEvent {
    pub fn new(x: f64, z: f64) -> Self {
        Self {
            x,
            z,
            cancelled: false,
        }
    }
}

/// Cause of a host move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    SelfMove,
    Pushed,
    Vehicle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvent {
    pub move_type: MoveType,
    pub movement: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_input_starts_from_host_values() {
        let input = PlayerInput {
            directional: DirectionalInput::FORWARDS,
            jump: true,
            sneak: false,
            sprint: false,
        };
        let event = MovementInputEvent::new(&input);
        assert_eq!(event.directional.value(), DirectionalInput::FORWARDS);
        assert!(event.jump.value());
        assert!(!event.sneak.value());
        assert!(!event.directional.is_overridden());
    }

    #[test]
    fn test_sprint_walking_predicates() {
        let sideways = SprintEvent::new(0.0, 1.0, true, false, 0.8, 1.0e-5);
        assert!(!sideways.walking);
        assert!(sideways.omni_walking);
        assert!(!sideways.intent.value());

        let sneaking = SprintEvent::new(0.3, 0.0, true, false, 0.8, 1.0e-5);
        assert!(sneaking.has_forward_movement);
        assert!(!sneaking.walking);

        let swimming = SprintEvent::new(0.3, 0.0, true, true, 0.8, 1.0e-5);
        assert!(swimming.walking);
        assert!(swimming.intent.value());
    }

    #[test]
    fn test_veto_is_sticky() {
        let mut veto = MovementVetoEvent::new(1.0, 0.0);
        veto.stop_forward();
        veto.stop_forward();
        assert!(veto.forward_stopped());
        assert!(!veto.sideways_stopped());
    }
}
