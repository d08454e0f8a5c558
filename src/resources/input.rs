//! Per-tick movement input as seen by the engine.
//!
//! The host hands over its raw key state once per tick as a [`PlayerInput`].
//! [`DirectionalInput`] holds the four movement axes and
//! [`movement_multiplier`] is the host's canonical rule for collapsing an
//! opposing pair into one signed magnitude.
use serde::{Deserialize, Serialize};

/// Four independent directional keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub forwards: bool,
    pub backwards: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalInput {
    /// No key held.
    pub const NONE: DirectionalInput = DirectionalInput {
        forwards: false,
        backwards: false,
        left: false,
        right: false,
    };
    /// Only the forward key held.
    pub const FORWARDS: DirectionalInput = DirectionalInput {
        forwards: true,
        backwards: false,
        left: false,
        right: false,
    };
    /// Only the backward key held.
    pub const BACKWARDS: DirectionalInput = DirectionalInput {
        forwards: false,
        backwards: true,
        left: false,
        right: false,
    };

    pub fn new(forwards: bool, backwards: bool, left: bool, right: bool) -> Self {
        Self {
            forwards,
            backwards,
            left,
            right,
        }
    }

    /// Signed forward magnitude (`forwards` positive).
    pub fn forward_multiplier(&self) -> f32 {
        movement_multiplier(self.forwards, self.backwards)
    }

    /// Signed sideways magnitude (`left` positive).
    pub fn sideways_multiplier(&self) -> f32 {
        movement_multiplier(self.left, self.right)
    }

    /// Whether any key is held.
    pub fn is_moving(&self) -> bool {
        self.forwards || self.backwards || self.left || self.right
    }
}

/// Collapse an opposing key pair into `-1.0`, `0.0` or `1.0`.
///
/// Both or neither held cancel out to zero; the keys are never summed.
pub fn movement_multiplier(positive: bool, negative: bool) -> f32 {
    if positive == negative {
        0.0
    } else if positive {
        1.0
    } else {
        -1.0
    }
}

/// Raw key state provided by the host for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub directional: DirectionalInput,
    pub jump: bool,
    pub sneak: bool,
    /// Sprint key held.
    pub sprint: bool,
}

impl PlayerInput {
    pub fn from_directional(directional: DirectionalInput) -> Self {
        Self {
            directional,
            ..Default::default()
        }
    }
}
