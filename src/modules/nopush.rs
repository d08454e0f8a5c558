//! Stops the host from pushing the entity out of blocks.
use smallvec::smallvec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::modules::{Hook, Hooks, Module};
use crate::resources::eventbus::priority;

#[derive(Debug, Clone, Default)]
pub struct NoPushPolicy;

impl Module for NoPushPolicy {
    fn name(&self) -> &str {
        "no-push"
    }

    fn hooks(&self) -> Hooks {
        smallvec![Hook::new(EventKind::PushOut, priority::DEFAULT)]
    }

    fn handle(&mut self, event: &mut Event) -> HandlerResult {
        event.cancel();
        Ok(())
    }
}
