//! Behavioral modules.
//!
//! A [`Module`] is an independently enabled unit that subscribes to one or
//! more extension points, each with a fixed declared [`Priority`]. The
//! [`ModuleRegistry`](registry::ModuleRegistry) wires enabled modules into the
//! event bus and applies enable/disable only at tick boundaries.
//!
//! Submodules overview:
//! - [`registry`] – ordered activation and precedence
//! - [`sprint`] – sprint policy
//! - [`stopmoving`] – knockback policy that halts movement
//! - [`noslow`] – replaces sneak and item-use slowdowns
//! - [`nopush`] – cancels host push-out
//! - [`fixedaim`] – rotation policy aiming at a fixed orientation
use smallvec::SmallVec;

use crate::error::HandlerResult;
use crate::events::{Event, EventKind};
use crate::resources::eventbus::Priority;

pub mod fixedaim;
pub mod nopush;
pub mod noslow;
pub mod registry;
pub mod sprint;
pub mod stopmoving;

/// One subscription a module declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    pub kind: EventKind,
    pub priority: Priority,
}

impl Hook {
    pub fn new(kind: EventKind, priority: Priority) -> Self {
        Self { kind, priority }
    }
}

pub type Hooks = SmallVec<[Hook; 4]>;

pub trait Module {
    /// Identity used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Extension points this module participates in. Read when the module is
    /// enabled; must not change while it stays enabled.
    fn hooks(&self) -> Hooks;

    /// Called for every event of a hooked kind.
    fn handle(&mut self, event: &mut Event) -> HandlerResult;

    fn on_enable(&mut self) {}

    fn on_disable(&mut self) {}
}
