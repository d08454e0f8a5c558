//! Rotation policy that aims at one fixed orientation every tick.
use smallvec::smallvec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::modules::{Hook, Hooks, Module};
use crate::resources::eventbus::{Priority, priority};
use crate::resources::rotation::{AimPlan, AimRequest, Orientation};

#[derive(Debug, Clone)]
pub struct FixedAimPolicy {
    pub orientation: Orientation,
    pub plan: AimPlan,
    pub priority: Priority,
}

impl FixedAimPolicy {
    pub fn new(orientation: Orientation, plan: AimPlan) -> Self {
        Self {
            orientation,
            plan,
            priority: priority::MODEL_STATE,
        }
    }
}

impl Module for FixedAimPolicy {
    fn name(&self) -> &str {
        "fixed-aim"
    }

    fn hooks(&self) -> Hooks {
        smallvec![Hook::new(EventKind::PreTick, self.priority)]
    }

    fn handle(&mut self, event: &mut Event) -> HandlerResult {
        if let Event::PreTick(tick) = event {
            tick.request_aim(AimRequest::new(self.orientation, self.plan, "fixed-aim"));
        }
        Ok(())
    }
}
