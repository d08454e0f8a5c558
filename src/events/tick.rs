//! Tick boundary events.
//!
//! [`PreTickEvent`] opens the tick. It is also where modules publish an aim
//! request: the `aim` slot starts with whatever the host published for this
//! tick and the highest-priority handler that writes it wins.
//!
//! [`PostTickEvent`] closes the tick and reports what the tick produced. It is
//! read-only; handlers can observe but not change anything.
use bevy_ecs::prelude::Entity;

use crate::events::slot::ResultSlot;
use crate::resources::input::PlayerInput;
use crate::resources::rotation::{AimRequest, Orientation};
use crate::resources::snapshot::NetworkSnapshot;
use crate::resources::tickstate::MovementOutput;

#[derive(Debug, Clone, PartialEq)]
pub struct PreTickEvent {
    pub tick: u64,
    pub entity: Option<Entity>,
    /// Raw host input for this tick.
    pub input: PlayerInput,
    /// Orientation the host would render without any override.
    pub rendered: Orientation,
    pub aim: ResultSlot<Option<AimRequest>>,
}

impl PreTickEvent {
    pub fn new(
        tick: u64,
        entity: Option<Entity>,
        input: PlayerInput,
        rendered: Orientation,
        published: Option<AimRequest>,
    ) -> Self {
        Self {
            tick,
            entity,
            input,
            rendered,
            aim: ResultSlot::new(published),
        }
    }

    /// Ask for `request` to be this tick's resolved orientation.
    pub fn request_aim(&mut self, request: AimRequest) -> bool {
        self.aim.set(Some(request))
    }

    /// Veto any aim for this tick, including one published by the host.
    pub fn clear_aim(&mut self) -> bool {
        self.aim.set(None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostTickEvent {
    pub tick: u64,
    pub movement: MovementOutput,
    /// What actually went out, if the host sent a movement packet this tick.
    pub sent: Option<NetworkSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::rotation::AimPlan;

    #[test]
    fn test_pre_tick_prefilled_aim_can_be_replaced_once() {
        let host = AimRequest::new(Orientation::new(10.0, 0.0), AimPlan::default(), "host");
        let mut event = PreTickEvent::new(
            1,
            None,
            PlayerInput::default(),
            Orientation::default(),
            Some(host.clone()),
        );
        assert_eq!(event.aim.get().as_ref(), Some(&host));

        let module = AimRequest::new(Orientation::new(20.0, 0.0), AimPlan::default(), "aim");
        assert!(event.request_aim(module.clone()));
        assert!(!event.clear_aim());
        assert_eq!(event.aim.get().as_ref(), Some(&module));
    }
}
