//! Replaces the host's sneak and item-use slowdowns.
use smallvec::smallvec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::modules::{Hook, Hooks, Module};
use crate::resources::eventbus::priority;

#[derive(Debug, Clone)]
pub struct NoSlowPolicy {
    /// Replacement (forward, sideways) factors while an item is in use.
    pub use_multiplier: (f32, f32),
    /// Replacement sneak factor; `None` leaves sneaking alone.
    pub sneak_multiplier: Option<f32>,
}

impl Default for NoSlowPolicy {
    fn default() -> Self {
        Self {
            use_multiplier: (1.0, 1.0),
            sneak_multiplier: None,
        }
    }
}

impl Module for NoSlowPolicy {
    fn name(&self) -> &str {
        "no-slow"
    }

    fn hooks(&self) -> Hooks {
        let mut hooks: Hooks = smallvec![Hook::new(EventKind::UseMultiplier, priority::DEFAULT)];
        if self.sneak_multiplier.is_some() {
            hooks.push(Hook::new(EventKind::SneakMultiplier, priority::DEFAULT));
        }
        hooks
    }

    fn handle(&mut self, event: &mut Event) -> HandlerResult {
        match event {
            Event::UseMultiplier(e) => {
                e.forward.set(self.use_multiplier.0);
                e.sideways.set(self.use_multiplier.1);
            }
            Event::SneakMultiplier(e) => {
                if let Some(m) = self.sneak_multiplier {
                    e.multiplier.set(m);
                }
            }
            _ => {}
        }
        Ok(())
    }
}
