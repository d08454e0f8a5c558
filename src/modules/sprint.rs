//! Sprint policy.
use smallvec::smallvec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::modules::{Hook, Hooks, Module};
use crate::resources::eventbus::{Priority, priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintMode {
    /// Sprint whenever the host counts the entity as walking, key or not.
    Legit,
    /// Sprint when walking in any direction.
    Omnidirectional,
    /// Never sprint.
    Prevent,
}

#[derive(Debug, Clone)]
pub struct SprintPolicy {
    pub mode: SprintMode,
    pub priority: Priority,
}

impl SprintPolicy {
    pub fn new(mode: SprintMode) -> Self {
        Self {
            mode,
            priority: priority::DEFAULT,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl Module for SprintPolicy {
    fn name(&self) -> &str {
        "sprint"
    }

    fn hooks(&self) -> Hooks {
        smallvec![Hook::new(EventKind::Sprint, self.priority)]
    }

    fn handle(&mut self, event: &mut Event) -> HandlerResult {
        let Event::Sprint(sprint) = event else {
            return Ok(());
        };
        let intent = match self.mode {
            SprintMode::Legit => sprint.walking,
            SprintMode::Omnidirectional => sprint.omni_walking,
            SprintMode::Prevent => false,
        };
        sprint.intent.set(intent);
        Ok(())
    }
}
