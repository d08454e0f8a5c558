//! Error taxonomy of the engine.
//!
//! [`EngineError`] covers both the diagnostics recorded while a tick runs
//! (reentrant dispatch, handler failure, inconsistent snapshot) and the
//! lifecycle misuse a host can commit. [`HandlerError`] is what event handlers
//! return; the bus turns it into an [`EngineError::HandlerFailure`].
use thiserror::Error;

use crate::events::EventKind;
use crate::resources::snapshot::NetworkSnapshot;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A handler tried to dispatch the kind that is currently being dispatched.
    #[error("'{owner}' attempted a reentrant dispatch of {kind:?}")]
    ReentrantDispatch { kind: EventKind, owner: String },
    /// A handler returned an error or panicked.
    #[error("handler '{owner}' failed on {kind:?}: {reason}")]
    HandlerFailure {
        kind: EventKind,
        owner: String,
        reason: String,
    },
    /// A module's `on_enable` or `on_disable` panicked.
    #[error("module '{owner}' failed in {hook}: {reason}")]
    LifecycleFailure {
        owner: String,
        hook: &'static str,
        reason: String,
    },
    /// The host transmitted something other than the PRE snapshot.
    #[error("host sent values differing from the PRE snapshot in {fields:?}")]
    InconsistentSnapshot {
        pre: NetworkSnapshot,
        sent: NetworkSnapshot,
        fields: Vec<&'static str>,
    },
    #[error("no tick is active")]
    TickNotActive,
    #[error("a tick is already active")]
    TickAlreadyActive,
    #[error("the movement snapshot was already sent this tick")]
    SnapshotAlreadySent,
    #[error("no PRE snapshot was captured this tick")]
    SnapshotNotCaptured,
    #[error("unknown module id {0}")]
    UnknownModule(usize),
}

/// Error returned by an event handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),
    /// The module is still borrowed by an outer dispatch.
    #[error("module is busy handling another event")]
    Busy,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Message(message.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Message(message)
    }
}

/// Result type of event handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_failure_message_names_owner() {
        let err = EngineError::HandlerFailure {
            kind: EventKind::MovementInput,
            owner: "sprint".into(),
            reason: "boom".into(),
        };
        let text = err.to_string();
        assert!(text.contains("sprint"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_handler_error_from_str() {
        let err: HandlerError = "nope".into();
        assert_eq!(err.to_string(), "nope");
    }
}
