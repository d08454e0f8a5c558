//! Tick boundary systems.
//!
//! - [`open_tick`] – insert the per-tick resources (not a system; called with
//!   the world before the input schedule runs)
//! - [`dispatch_pre_tick`] – fire `PreTick` and settle the tick's aim request
//! - [`close_tick`] – fire `PostTick` and remove every per-tick resource
use bevy_ecs::prelude::*;
use log::trace;

use crate::error::EngineError;
use crate::events::{PostTickEvent, PreTickEvent};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::eventbus::EventBus;
use crate::resources::hostframe::HostFrame;
use crate::resources::rotation::RotationState;
use crate::resources::snapshot::NetworkSnapshot;
use crate::resources::tickstate::{MovementOutput, TickState};

/// Reset the working record to the host's raw values for tick `tick`.
pub fn open_tick(world: &mut World, tick: u64, frame: HostFrame) -> Result<(), EngineError> {
    if world.contains_resource::<TickState>() {
        return Err(EngineError::TickAlreadyActive);
    }
    world.insert_resource(TickState::begin(tick, &frame));
    world.insert_resource(frame);
    trace!("tick {} opened", tick);
    Ok(())
}

/// Fire `PreTick`. The aim slot starts with the host-published request and
/// the winner becomes the tick's active aim.
pub fn dispatch_pre_tick(
    bus: NonSend<EventBus>,
    frame: Res<HostFrame>,
    state: Res<TickState>,
    config: Res<EngineConfig>,
    mut rotation: ResMut<RotationState>,
) {
    let published = rotation.take_pending();
    let event = bus.emit(PreTickEvent::new(
        state.tick,
        state.entity,
        frame.input,
        frame.rendered,
        published,
    ));
    rotation.activate(event.aim.into_inner(), config.pitch_limit);
}

/// Movement values as they stand, with the tick's orientations.
pub fn movement_output(world: &mut World) -> Result<MovementOutput, EngineError> {
    let rendered = world
        .get_resource::<HostFrame>()
        .ok_or(EngineError::TickNotActive)?
        .rendered;
    let (shown, transmitted) = {
        let mut rotation = world.resource_mut::<RotationState>();
        (rotation.rendered(rendered), rotation.transmitted(rendered))
    };
    let state = world
        .get_resource::<TickState>()
        .ok_or(EngineError::TickNotActive)?;
    Ok(state.output(shown, transmitted))
}

/// Fire `PostTick` and drop the tick's transient state.
pub fn close_tick(
    world: &mut World,
) -> Result<(MovementOutput, Option<NetworkSnapshot>), EngineError> {
    let movement = movement_output(world)?;
    let sent = world.resource::<TickState>().sent;

    let bus = world.non_send_resource::<EventBus>().clone();
    bus.emit(PostTickEvent {
        tick: movement.tick,
        movement,
        sent,
    });

    world.remove_resource::<TickState>();
    world.remove_resource::<HostFrame>();
    world.resource_mut::<RotationState>().end_tick();
    trace!("tick {} closed", movement.tick);
    Ok((movement, sent))
}
