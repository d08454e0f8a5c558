//! Remaining per-feature overrides, applied after the movement vector is final:
//! sneak slowdown, item-use slowdown and sprint intent.
use bevy_ecs::prelude::*;
use log::trace;

use crate::events::{SneakMultiplierEvent, SprintEvent, UseMultiplierEvent};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::eventbus::EventBus;
use crate::resources::hostframe::HostFrame;
use crate::resources::tickstate::TickState;

pub fn apply_module_overrides(
    bus: NonSend<EventBus>,
    frame: Res<HostFrame>,
    config: Res<EngineConfig>,
    mut state: ResMut<TickState>,
) {
    if state.input.sneak {
        let multiplier = bus
            .emit(SneakMultiplierEvent::new(config.sneak_multiplier))
            .multiplier
            .value();
        state.forward *= multiplier;
        state.sideways *= multiplier;
    }

    if frame.using_item {
        let event = bus.emit(UseMultiplierEvent::new(
            config.use_multiplier,
            config.use_multiplier,
        ));
        state.forward *= event.forward.value();
        state.sideways *= event.sideways.value();
    }

    let sprint = bus.emit(SprintEvent::new(
        state.forward,
        state.sideways,
        frame.input.sprint,
        frame.submerged,
        config.walking_threshold,
        config.movement_epsilon,
    ));
    state.sprint_intent = sprint.intent.value();
    trace!(
        "final input forward={} sideways={} sprint={}",
        state.forward, state.sideways, state.sprint_intent
    );
}
