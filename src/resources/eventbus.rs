//! Priority-ordered, cancellable, synchronous event bus.
//!
//! Handlers subscribe to one [`EventKind`] with a [`Priority`]. Dispatch walks
//! them from highest to lowest priority; equal priorities keep registration
//! order. Every handler sees the event as left by the previous one.
//!
//! Failure isolation:
//! - a handler that returns an error or panics has its changes to the event
//!   rolled back, the failure is logged and recorded, and dispatch moves on;
//! - a handler that dispatches a kind already being dispatched gets
//!   [`EngineError::ReentrantDispatch`] back and its own changes are discarded
//!   the same way.
//!
//! If a cancellable event gets cancelled, the remaining handlers of that
//! dispatch are skipped. Nothing else stops.
//!
//! [`EventBus`] is a cheap `Rc` handle; clones share the same subscriptions.
//! It is deliberately not `Send`: the engine only ever runs on the host's
//! simulation thread.
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use log::{debug, error, trace};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{EngineError, HandlerError, HandlerResult};
use crate::events::{Event, EventKind};

/// Handler ordering key; higher runs first.
pub type Priority = i32;

/// Conventional priorities.
pub mod priority {
    use super::Priority;

    /// Runs before everything else.
    pub const FIRST: Priority = 1000;
    /// Features that keep the player out of trouble.
    pub const SAFETY_FEATURE: Priority = 100;
    /// Features that model state other handlers depend on.
    pub const MODEL_STATE: Priority = 50;
    pub const DEFAULT: Priority = 0;
    /// Runs late enough to object to whatever came before.
    pub const OBJECTION_AGAINST_EVERYTHING: Priority = -100;
    /// Observers of the final value.
    pub const READ_FINAL_STATE: Priority = -1000;
}

pub type Handler = Box<dyn FnMut(&mut Event) -> HandlerResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

struct Registration {
    id: HandlerId,
    priority: Priority,
    owner: Rc<str>,
    removed: Cell<bool>,
    handler: RefCell<Handler>,
}

/// One in-progress dispatch.
struct Frame {
    kind: EventKind,
    owner: Rc<str>,
    violated: bool,
}

#[derive(Default)]
struct BusInner {
    handlers: RefCell<FxHashMap<EventKind, Vec<Rc<Registration>>>>,
    next_id: Cell<u64>,
    frames: RefCell<Vec<Frame>>,
    diagnostics: RefCell<Vec<EngineError>>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `kind`.
    ///
    /// A handler registered while `kind` is being dispatched first fires on
    /// the next dispatch.
    pub fn register<F>(
        &self,
        kind: EventKind,
        priority: Priority,
        owner: impl Into<String>,
        handler: F,
    ) -> HandlerId
    where
        F: FnMut(&mut Event) -> HandlerResult + 'static,
    {
        let id = HandlerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let registration = Rc::new(Registration {
            id,
            priority,
            owner: Rc::from(owner.into()),
            removed: Cell::new(false),
            handler: RefCell::new(Box::new(handler)),
        });
        let mut handlers = self.inner.handlers.borrow_mut();
        let chain = handlers.entry(kind).or_default();
        let at = chain.partition_point(|r| r.priority >= priority);
        chain.insert(at, registration);
        trace!("registered handler {:?} for {:?} at priority {}", id, kind, priority);
        id
    }

    /// Remove one handler. Takes effect immediately, also for a dispatch in
    /// progress.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut found = false;
        for chain in self.inner.handlers.borrow_mut().values_mut() {
            chain.retain(|r| {
                if r.id == id {
                    r.removed.set(true);
                    found = true;
                    false
                } else {
                    true
                }
            });
        }
        found
    }

    /// Remove every handler registered under `owner`. Returns how many.
    pub fn unregister_owner(&self, owner: &str) -> usize {
        let mut count = 0;
        for chain in self.inner.handlers.borrow_mut().values_mut() {
            chain.retain(|r| {
                if &*r.owner == owner {
                    r.removed.set(true);
                    count += 1;
                    false
                } else {
                    true
                }
            });
        }
        count
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.inner
            .handlers
            .borrow()
            .get(&kind)
            .map_or(0, |chain| chain.len())
    }

    /// Whether `kind` is being dispatched right now.
    pub fn is_dispatching(&self, kind: EventKind) -> bool {
        self.inner.frames.borrow().iter().any(|f| f.kind == kind)
    }

    /// Run every handler of the event's kind over it and return the result.
    ///
    /// Fails only with [`EngineError::ReentrantDispatch`], in which case no
    /// handler ran.
    pub fn dispatch(&self, mut event: Event) -> Result<Event, EngineError> {
        let kind = event.kind();
        if let Some(err) = self.check_reentrancy(kind) {
            return Err(err);
        }

        let chain: SmallVec<[Rc<Registration>; 8]> = self
            .inner
            .handlers
            .borrow()
            .get(&kind)
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default();

        self.inner.frames.borrow_mut().push(Frame {
            kind,
            owner: Rc::from(""),
            violated: false,
        });

        for registration in chain {
            if registration.removed.get() {
                continue;
            }
            self.enter_handler(&registration.owner);

            let before = event.clone();
            let outcome = match registration.handler.try_borrow_mut() {
                Ok(mut handler) => catch_unwind(AssertUnwindSafe(|| (&mut **handler)(&mut event))),
                Err(_) => Ok(Err(HandlerError::Busy)),
            };
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(payload) => Some(panic_message(payload.as_ref())),
            };

            if self.handler_violated() {
                // Already recorded as ReentrantDispatch.
                event = before;
            } else if let Some(reason) = failure {
                self.record(EngineError::HandlerFailure {
                    kind,
                    owner: registration.owner.to_string(),
                    reason,
                });
                event = before;
            }

            if event.is_cancelled() {
                debug!("{:?} cancelled by '{}'", kind, registration.owner);
                break;
            }
        }

        self.inner.frames.borrow_mut().pop();
        Ok(event)
    }

    /// Typed convenience over [`EventBus::dispatch`]: hands back the payload
    /// after dispatch, or unchanged if the dispatch was rejected.
    pub fn emit<E>(&self, payload: E) -> E
    where
        E: Clone + Into<Event> + TryFrom<Event>,
    {
        match self.dispatch(payload.clone().into()) {
            Ok(event) => E::try_from(event).ok().unwrap_or(payload),
            Err(_) => payload,
        }
    }

    /// Record a diagnostic raised outside of a handler.
    pub fn report(&self, err: EngineError) {
        self.record(err);
    }

    /// Take every diagnostic recorded since the last call.
    pub fn drain_diagnostics(&self) -> Vec<EngineError> {
        std::mem::take(&mut *self.inner.diagnostics.borrow_mut())
    }

    fn record(&self, err: EngineError) {
        match &err {
            EngineError::InconsistentSnapshot { .. } => log::warn!("{err}"),
            _ => error!("{err}"),
        }
        self.inner.diagnostics.borrow_mut().push(err);
    }

    fn check_reentrancy(&self, kind: EventKind) -> Option<EngineError> {
        let mut frames = self.inner.frames.borrow_mut();
        if !frames.iter().any(|f| f.kind == kind) {
            return None;
        }
        let top = frames.last_mut()?;
        top.violated = true;
        let err = EngineError::ReentrantDispatch {
            kind,
            owner: top.owner.to_string(),
        };
        drop(frames);
        self.record(err.clone());
        Some(err)
    }

    fn enter_handler(&self, owner: &Rc<str>) {
        if let Some(top) = self.inner.frames.borrow_mut().last_mut() {
            top.owner = owner.clone();
            top.violated = false;
        }
    }

    fn handler_violated(&self) -> bool {
        self.inner
            .frames
            .borrow()
            .last()
            .is_some_and(|f| f.violated)
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
