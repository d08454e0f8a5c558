//! Tick stages.
//!
//! The input half of a tick is a chain of ECS systems run by
//! [`input_schedule`]; the network and closing stages are plain functions over
//! the world because they are driven by the host at its own pace.
//!
//! Submodules overview
//! - [`tick`] – open/close the tick, fire `PreTick`/`PostTick`
//! - [`movementinput`] – directional input, rotation fix-up, vetoes
//! - [`rotation`] – resolve the tick's orientation
//! - [`overrides`] – sneak/use multipliers and sprint intent
//! - [`network`] – PRE/POST movement snapshot interception
//!
//! # Stage Ordering
//!
//! The order below is part of the engine's observable behavior:
//! 1. `dispatch_pre_tick`
//! 2. `base_movement_input`
//! 3. `resolve_rotation`
//! 4. `rotated_movement_input`
//! 5. `apply_module_overrides`
//! 6. network interception (host driven)
//! 7. `close_tick`
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

pub mod movementinput;
pub mod network;
pub mod overrides;
pub mod rotation;
pub mod tick;

use movementinput::{base_movement_input, rotated_movement_input};
use overrides::apply_module_overrides;
use rotation::resolve_rotation;
use tick::dispatch_pre_tick;

/// Chained, single-threaded schedule for stages 1 to 5.
pub fn input_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            dispatch_pre_tick,
            base_movement_input,
            resolve_rotation,
            rotated_movement_input,
            apply_module_overrides,
        )
            .chain(),
    );
    schedule
}
