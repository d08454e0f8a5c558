//! Movement input transform.
//!
//! Two systems bracket rotation resolution:
//!
//! - [`base_movement_input`] – lets modules replace the directional keys
//!   (and jump/sneak) through `MovementInput`, then recomputes the forward and
//!   sideways multipliers from the result.
//! - [`rotated_movement_input`] – if the tick has a resolved orientation and
//!   its plan asks for it, rotates the (forward, sideways) vector by the yaw
//!   difference between the shown and the resolved orientation and rounds it
//!   to the host's step. Then `RotatedMovementInput` may replace the values, and
//!   finally `MovementVeto` may zero an axis for good.
//!
//! The rotation keeps movement pointing where the rendered view points while
//! the network carries a different orientation.
use bevy_ecs::prelude::*;
use log::trace;

use crate::events::{MovementInputEvent, MovementVetoEvent, RotatedMovementInputEvent};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::eventbus::EventBus;
use crate::resources::hostframe::HostFrame;
use crate::resources::rotation::RotationState;
use crate::resources::tickstate::TickState;

/// Rotate a (forward, sideways) movement vector by `delta_yaw` degrees.
///
/// Returns `(forward, sideways)`. The vector's length is preserved.
pub fn rotate_movement(forward: f32, sideways: f32, delta_yaw: f32) -> (f32, f32) {
    let (sin, cos) = delta_yaw.to_radians().sin_cos();
    let rotated_sideways = sideways * cos - forward * sin;
    let rotated_forward = forward * cos + sideways * sin;
    (rotated_forward, rotated_sideways)
}

/// Round to the nearest multiple of `step`, halves rounding up.
pub fn round_to_step(value: f32, step: f32) -> f32 {
    (value / step + 0.5).floor() * step
}

pub fn base_movement_input(bus: NonSend<EventBus>, mut state: ResMut<TickState>) {
    let event = bus.emit(MovementInputEvent::new(&state.input));
    let directional = event.directional.value();
    state.input.directional = directional;
    state.input.jump = event.jump.value();
    state.input.sneak = event.sneak.value();
    state.forward = directional.forward_multiplier();
    state.sideways = directional.sideways_multiplier();
    trace!("base input forward={} sideways={}", state.forward, state.sideways);
}

pub fn rotated_movement_input(
    bus: NonSend<EventBus>,
    frame: Res<HostFrame>,
    config: Res<EngineConfig>,
    mut rotation: ResMut<RotationState>,
    mut state: ResMut<TickState>,
) {
    let resolved = rotation.resolve();
    let fix_up = rotation.plan().is_some_and(|plan| plan.apply_velocity_fix);
    // With change_look the view shown is the resolved one.
    let shown = rotation.rendered(frame.rendered);

    let (forward, sideways, fixed_up) = match resolved {
        Some(target) if fix_up => {
            let (forward, sideways) =
                rotate_movement(state.forward, state.sideways, shown.yaw - target.yaw);
            (
                round_to_step(forward, config.movement_step),
                round_to_step(sideways, config.movement_step),
                true,
            )
        }
        _ => (state.forward, state.sideways, false),
    };

    let event = bus.emit(RotatedMovementInputEvent::new(
        forward,
        sideways,
        shown,
        resolved,
        fixed_up,
    ));
    state.forward = event.forward.value();
    state.sideways = event.sideways.value();

    let veto = bus.emit(MovementVetoEvent::new(state.forward, state.sideways));
    if veto.forward_stopped() {
        state.forward = 0.0;
    }
    if veto.sideways_stopped() {
        state.sideways = 0.0;
    }
    trace!(
        "rotated input forward={} sideways={} fixed_up={}",
        state.forward, state.sideways, fixed_up
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let (f, s) = rotate_movement(1.0, -1.0, 0.0);
        assert!(approx_eq(f, 1.0));
        assert!(approx_eq(s, -1.0));
    }

    #[test]
    fn test_quarter_turn_moves_forward_to_sideways() {
        // rendered 0, resolved 90
        let (f, s) = rotate_movement(1.0, 0.0, 0.0 - 90.0);
        assert!(approx_eq(f, 0.0));
        assert!(approx_eq(s, 1.0));
        assert_eq!(round_to_step(f, 1.0), 0.0);
        assert_eq!(round_to_step(s, 1.0), 1.0);
    }

    #[test]
    fn test_half_turn_reverses() {
        let (f, s) = rotate_movement(1.0, 0.0, 180.0);
        assert_eq!(round_to_step(f, 1.0), -1.0);
        assert_eq!(round_to_step(s, 1.0), 0.0);
    }

    #[test]
    fn test_rotation_preserves_magnitude() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let forward = rng.f32() * 2.0 - 1.0;
            let sideways = rng.f32() * 2.0 - 1.0;
            let delta = rng.f32() * 720.0 - 360.0;
            let (f, s) = rotate_movement(forward, sideways, delta);
            let before = forward.hypot(sideways);
            let after = f.hypot(s);
            assert!(approx_eq(before, after), "{before} vs {after} at {delta}");
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_step(0.5, 1.0), 1.0);
        assert_eq!(round_to_step(-0.5, 1.0), 0.0);
        assert_eq!(round_to_step(-0.7, 1.0), -1.0);
        assert_eq!(round_to_step(0.26, 0.5), 0.5);
    }
}
