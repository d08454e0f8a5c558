//! Knockback policy: halts movement while enabled.
//!
//! Uses the veto stage, so nothing running before it can bring the movement
//! back. With `omnidirectional` the sideways axis is stopped as well, for
//! setups where sprinting sideways would otherwise keep the momentum.
use smallvec::smallvec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::modules::{Hook, Hooks, Module};
use crate::resources::eventbus::priority;

#[derive(Debug, Clone, Default)]
pub struct StopMovingPolicy {
    pub omnidirectional: bool,
}

impl StopMovingPolicy {
    pub fn new(omnidirectional: bool) -> Self {
        Self { omnidirectional }
    }
}

impl Module for StopMovingPolicy {
    fn name(&self) -> &str {
        "stop-moving"
    }

    fn hooks(&self) -> Hooks {
        smallvec![Hook::new(EventKind::MovementVeto, priority::SAFETY_FEATURE)]
    }

    fn handle(&mut self, event: &mut Event) -> HandlerResult {
        if let Event::MovementVeto(veto) = event {
            veto.stop_forward();
            if self.omnidirectional {
                veto.stop_sideways();
            }
        }
        Ok(())
    }
}
