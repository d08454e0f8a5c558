//! Resolve the tick's orientation once, before anything reads it.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::rotation::RotationState;

pub fn resolve_rotation(mut rotation: ResMut<RotationState>) {
    if let Some(resolved) = rotation.resolve() {
        debug!("resolved orientation yaw={} pitch={}", resolved.yaw, resolved.pitch);
    }
}
