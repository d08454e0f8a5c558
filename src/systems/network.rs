//! Network snapshot interceptor.
//!
//! The host never builds its movement packet from its own values. It asks
//! [`capture_pre`] for the snapshot, sends exactly that, and reports what went
//! out through [`capture_post`]. [`intercept_network_send`] does all three
//! against a [`NetworkSink`].
//!
//! If the host reports values differing from the PRE snapshot (for example
//! because it clamped them), the difference is recorded as
//! [`EngineError::InconsistentSnapshot`] and the POST event still carries the
//! values that were really sent.
use bevy_ecs::prelude::*;
use log::trace;

use crate::error::EngineError;
use crate::events::{NetworkMovementPostEvent, NetworkMovementPreEvent};
use crate::resources::eventbus::EventBus;
use crate::resources::hostframe::HostFrame;
use crate::resources::rotation::RotationState;
use crate::resources::snapshot::NetworkSnapshot;
use crate::resources::tickstate::TickState;

/// The host's send primitive.
pub trait NetworkSink {
    /// Transmit `snapshot` and return the values actually transmitted.
    fn send_movement(&mut self, snapshot: &NetworkSnapshot) -> NetworkSnapshot;
}

/// Result of one intercepted send.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendReport {
    pub pre: NetworkSnapshot,
    pub sent: NetworkSnapshot,
}

impl SendReport {
    pub fn is_consistent(&self) -> bool {
        self.pre == self.sent
    }
}

/// Build the snapshot from the host's about-to-send values and let handlers
/// rewrite it. The host must send the returned values.
pub fn capture_pre(world: &mut World) -> Result<NetworkSnapshot, EngineError> {
    let frame = *world
        .get_resource::<HostFrame>()
        .ok_or(EngineError::TickNotActive)?;
    if world
        .get_resource::<TickState>()
        .ok_or(EngineError::TickNotActive)?
        .pre_snapshot
        .is_some()
    {
        return Err(EngineError::SnapshotAlreadySent);
    }

    let orientation = world
        .resource_mut::<RotationState>()
        .transmitted(frame.rendered);
    let captured = NetworkSnapshot::new(frame.position, orientation, frame.on_ground);

    let bus = world.non_send_resource::<EventBus>().clone();
    let pre = bus.emit(NetworkMovementPreEvent::new(captured)).snapshot();
    trace!("PRE snapshot {:?}", pre);

    world.resource_mut::<TickState>().pre_snapshot = Some(pre);
    Ok(pre)
}

/// Record what the host sent and fire the POST event.
pub fn capture_post(world: &mut World, sent: NetworkSnapshot) -> Result<SendReport, EngineError> {
    let pre = {
        let state = world
            .get_resource::<TickState>()
            .ok_or(EngineError::TickNotActive)?;
        if state.sent.is_some() {
            return Err(EngineError::SnapshotAlreadySent);
        }
        state.pre_snapshot.ok_or(EngineError::SnapshotNotCaptured)?
    };

    let bus = world.non_send_resource::<EventBus>().clone();
    let fields = pre.differing_fields(&sent);
    if !fields.is_empty() {
        bus.report(EngineError::InconsistentSnapshot { pre, sent, fields });
    }

    world.resource_mut::<TickState>().sent = Some(sent);
    bus.emit(NetworkMovementPostEvent { pre, sent });
    Ok(SendReport { pre, sent })
}

/// Capture, send through `sink`, and report.
pub fn intercept_network_send(
    world: &mut World,
    sink: &mut dyn NetworkSink,
) -> Result<SendReport, EngineError> {
    let pre = capture_pre(world)?;
    let sent = sink.send_movement(&pre);
    capture_post(world, sent)
}
