//! Event types exchanged over the [`EventBus`](crate::resources::eventbus::EventBus).
//!
//! Every extension point of the tick has one [`EventKind`]. [`Event`] is the
//! tagged union carried through dispatch; each variant wraps a typed payload.
//! Payloads expose overridable values through [`ResultSlot`], and the kinds
//! that may short-circuit their handler chain carry a `cancelled` flag.
//!
//! Submodules:
//! - [`slot`] – first-write-wins result slot
//! - [`tick`] – `PreTick` / `PostTick`
//! - [`movement`] – input, rotated input, veto, multipliers, sprint, push-out, move
//! - [`network`] – PRE/POST movement snapshot events
use serde::{Deserialize, Serialize};

pub mod movement;
pub mod network;
pub mod slot;
pub mod tick;

pub use movement::{
    MoveEvent, MoveType, MovementInputEvent, MovementVetoEvent, PushOutEvent,
    RotatedMovementInputEvent, SneakMultiplierEvent, SprintEvent, UseMultiplierEvent,
};
pub use network::{NetworkMovementPostEvent, NetworkMovementPreEvent};
pub use slot::ResultSlot;
pub use tick::{PostTickEvent, PreTickEvent};

/// Extension points, listed in the order they fire during a tick.
///
/// `PushOut` and `Move` fire whenever the host's physics step asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    PreTick,
    MovementInput,
    RotatedMovementInput,
    MovementVeto,
    SneakMultiplier,
    UseMultiplier,
    Sprint,
    PushOut,
    Move,
    NetworkMovementPre,
    NetworkMovementPost,
    PostTick,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::PreTick,
        EventKind::MovementInput,
        EventKind::RotatedMovementInput,
        EventKind::MovementVeto,
        EventKind::SneakMultiplier,
        EventKind::UseMultiplier,
        EventKind::Sprint,
        EventKind::PushOut,
        EventKind::Move,
        EventKind::NetworkMovementPre,
        EventKind::NetworkMovementPost,
        EventKind::PostTick,
    ];

    /// Whether handlers of this kind may stop the rest of the chain.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            EventKind::MovementInput
                | EventKind::RotatedMovementInput
                | EventKind::SneakMultiplier
                | EventKind::UseMultiplier
                | EventKind::Sprint
                | EventKind::PushOut
                | EventKind::NetworkMovementPre
        )
    }
}

/// An event in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PreTick(PreTickEvent),
    MovementInput(MovementInputEvent),
    RotatedMovementInput(RotatedMovementInputEvent),
    MovementVeto(MovementVetoEvent),
    SneakMultiplier(SneakMultiplierEvent),
    UseMultiplier(UseMultiplierEvent),
    Sprint(SprintEvent),
    PushOut(PushOutEvent),
    Move(MoveEvent),
    NetworkMovementPre(NetworkMovementPreEvent),
    NetworkMovementPost(NetworkMovementPostEvent),
    PostTick(PostTickEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PreTick(_) => EventKind::PreTick,
            Event::MovementInput(_) => EventKind::MovementInput,
            Event::RotatedMovementInput(_) => EventKind::RotatedMovementInput,
            Event::MovementVeto(_) => EventKind::MovementVeto,
            Event::SneakMultiplier(_) => EventKind::SneakMultiplier,
            Event::UseMultiplier(_) => EventKind::UseMultiplier,
            Event::Sprint(_) => EventKind::Sprint,
            Event::PushOut(_) => EventKind::PushOut,
            Event::Move(_) => EventKind::Move,
            Event::NetworkMovementPre(_) => EventKind::NetworkMovementPre,
            Event::NetworkMovementPost(_) => EventKind::NetworkMovementPost,
            Event::PostTick(_) => EventKind::PostTick,
        }
    }

    fn cancel_flag(&mut self) -> Option<&mut bool> {
        match self {
            Event::MovementInput(e) => Some(&mut e.cancelled),
            Event::RotatedMovementInput(e) => Some(&mut e.cancelled),
            Event::SneakMultiplier(e) => Some(&mut e.cancelled),
            Event::UseMultiplier(e) => Some(&mut e.cancelled),
            Event::Sprint(e) => Some(&mut e.cancelled),
            Event::PushOut(e) => Some(&mut e.cancelled),
            Event::NetworkMovementPre(e) => Some(&mut e.cancelled),
            _ => None,
        }
    }

    /// Stop the remaining handlers of this dispatch.
    ///
    /// Returns `false` if the kind is not cancellable.
    pub fn cancel(&mut self) -> bool {
        match self.cancel_flag() {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        match self {
            Event::MovementInput(e) => e.cancelled,
            Event::RotatedMovementInput(e) => e.cancelled,
            Event::SneakMultiplier(e) => e.cancelled,
            Event::UseMultiplier(e) => e.cancelled,
            Event::Sprint(e) => e.cancelled,
            Event::PushOut(e) => e.cancelled,
            Event::NetworkMovementPre(e) => e.cancelled,
            _ => false,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident => $payload:ty),* $(,)?) => {
        $(
            impl From<$payload> for Event {
                fn from(payload: $payload) -> Self {
                    Event::$variant(payload)
                }
            }

            impl TryFrom<Event> for $payload {
                type Error = Event;

                fn try_from(event: Event) -> Result<Self, Event> {
                    match event {
                        Event::$variant(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_payload!(
    PreTick => PreTickEvent,
    MovementInput => MovementInputEvent,
    RotatedMovementInput => RotatedMovementInputEvent,
    MovementVeto => MovementVetoEvent,
    SneakMultiplier => SneakMultiplierEvent,
    UseMultiplier => UseMultiplierEvent,
    Sprint => SprintEvent,
    PushOut => PushOutEvent,
    Move => MoveEvent,
    NetworkMovementPre => NetworkMovementPreEvent,
    NetworkMovementPost => NetworkMovementPostEvent,
    PostTick => PostTickEvent,
);
