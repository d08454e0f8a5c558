//! Event bus behaviour seen through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use tickover::error::{EngineError, HandlerError};
use tickover::events::{Event, EventKind, MoveEvent, MoveType, PushOutEvent, SneakMultiplierEvent};
use tickover::resources::eventbus::{EventBus, priority};
use tickover::resources::snapshot::Position;

type Log = Rc<RefCell<Vec<&'static str>>>;

fn recorder(log: Log, label: &'static str) -> impl FnMut(&mut Event) -> Result<(), HandlerError> {
    move |_| {
        log.borrow_mut().push(label);
        Ok(())
    }
}

fn move_event() -> MoveEvent {
    MoveEvent {
        move_type: MoveType::SelfMove,
        movement: Position::new(0.1, 0.0, 0.0),
    }
}

#[test]
fn handlers_run_by_priority_then_registration() {
    let bus = EventBus::new();
    let log: Log = Rc::default();

    bus.register(EventKind::Move, priority::DEFAULT, "a", recorder(log.clone(), "default-1"));
    bus.register(EventKind::Move, priority::READ_FINAL_STATE, "b", recorder(log.clone(), "last"));
    bus.register(EventKind::Move, priority::FIRST, "c", recorder(log.clone(), "first"));
    bus.register(EventKind::Move, priority::DEFAULT, "d", recorder(log.clone(), "default-2"));
    bus.register(EventKind::PushOut, priority::FIRST, "e", recorder(log.clone(), "other-kind"));

    bus.emit(move_event());

    assert_eq!(*log.borrow(), vec!["first", "default-1", "default-2", "last"]);
}

#[test]
fn non_cancellable_kinds_ignore_cancel() {
    let bus = EventBus::new();
    let log: Log = Rc::default();
    let inner = log.clone();

    bus.register(EventKind::Move, 10, "canceller", move |event| {
        inner.borrow_mut().push("canceller");
        assert!(!event.cancel());
        Ok(())
    });
    bus.register(EventKind::Move, 0, "after", recorder(log.clone(), "after"));

    bus.emit(move_event());
    assert_eq!(*log.borrow(), vec!["canceller", "after"]);
}

#[test]
fn reentrant_dispatch_is_rejected_and_rolled_back() {
    let bus = EventBus::new();
    let handle = bus.clone();
    let inner_result = Rc::new(RefCell::new(None));
    let seen = inner_result.clone();

    bus.register(EventKind::SneakMultiplier, 10, "recursive", move |event| {
        if let Event::SneakMultiplier(e) = event {
            e.multiplier.set(0.0);
        }
        let nested = handle.dispatch(SneakMultiplierEvent::new(0.3).into());
        *seen.borrow_mut() = Some(nested.is_err());
        Ok(())
    });
    bus.register(EventKind::SneakMultiplier, 0, "honest", |event| {
        if let Event::SneakMultiplier(e) = event {
            e.multiplier.set(0.9);
        }
        Ok(())
    });

    let event = bus.emit(SneakMultiplierEvent::new(0.3));

    assert_eq!(*inner_result.borrow(), Some(true));
    assert_eq!(event.multiplier.value(), 0.9);
    assert_eq!(
        bus.drain_diagnostics(),
        vec![EngineError::ReentrantDispatch {
            kind: EventKind::SneakMultiplier,
            owner: "recursive".to_string(),
        }]
    );
}

#[test]
fn dispatching_another_kind_from_a_handler_is_allowed() {
    let bus = EventBus::new();
    let handle = bus.clone();
    let log: Log = Rc::default();

    bus.register(EventKind::PushOut, 0, "inner", recorder(log.clone(), "push-out"));
    bus.register(EventKind::Move, 0, "outer", move |_| {
        let pushed = handle.emit(PushOutEvent::new(0.0, 0.0));
        assert!(!pushed.cancelled);
        Ok(())
    });

    bus.emit(move_event());
    assert_eq!(*log.borrow(), vec!["push-out"]);
    assert!(bus.drain_diagnostics().is_empty());
}

#[test]
fn unregistering_mid_dispatch_skips_the_handler() {
    let bus = EventBus::new();
    let handle = bus.clone();
    let log: Log = Rc::default();

    bus.register(EventKind::Move, 10, "remover", move |_| {
        handle.unregister_owner("victim");
        Ok(())
    });
    bus.register(EventKind::Move, 0, "victim", recorder(log.clone(), "victim"));

    bus.emit(move_event());
    assert!(log.borrow().is_empty());
    assert_eq!(bus.handler_count(EventKind::Move), 1);
}

#[test]
fn registering_mid_dispatch_waits_for_next_dispatch() {
    let bus = EventBus::new();
    let handle = bus.clone();
    let log: Log = Rc::default();
    let late = log.clone();
    let mut registered = false;

    bus.register(EventKind::Move, 10, "spawner", move |_| {
        if !registered {
            registered = true;
            handle.register(EventKind::Move, 0, "late", recorder(late.clone(), "late"));
        }
        Ok(())
    });

    bus.emit(move_event());
    assert!(log.borrow().is_empty());
    bus.emit(move_event());
    assert_eq!(*log.borrow(), vec!["late"]);
}

#[test]
fn failures_are_recorded_once_and_drained() {
    let bus = EventBus::new();
    bus.register(EventKind::Move, 0, "grumpy", |_| Err("no".into()));

    bus.emit(move_event());
    bus.emit(move_event());

    let diagnostics = bus.drain_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| matches!(
        d,
        EngineError::HandlerFailure { owner, kind: EventKind::Move, .. } if owner == "grumpy"
    )));
    assert!(bus.drain_diagnostics().is_empty());
    assert!(!bus.is_dispatching(EventKind::Move));
}
