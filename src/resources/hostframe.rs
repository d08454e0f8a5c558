//! Host-provided values for one tick.
use bevy_ecs::prelude::{Entity, Resource};

use crate::resources::input::PlayerInput;
use crate::resources::rotation::Orientation;
use crate::resources::snapshot::Position;

/// Everything the host tells the engine at the start of a tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct HostFrame {
    pub entity: Option<Entity>,
    pub input: PlayerInput,
    /// Orientation the host would render this tick.
    pub rendered: Orientation,
    pub position: Position,
    pub on_ground: bool,
    pub submerged: bool,
    pub using_item: bool,
}

impl HostFrame {
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_input(mut self, input: PlayerInput) -> Self {
        self.input = input;
        self
    }

    pub fn with_rendered(mut self, rendered: Orientation) -> Self {
        self.rendered = rendered;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_on_ground(mut self, on_ground: bool) -> Self {
        self.on_ground = on_ground;
        self
    }

    pub fn with_submerged(mut self, submerged: bool) -> Self {
        self.submerged = submerged;
        self
    }

    pub fn with_using_item(mut self, using_item: bool) -> Self {
        self.using_item = using_item;
        self
    }
}
