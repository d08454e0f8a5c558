//! Values about to cross the network boundary.
use serde::{Deserialize, Serialize};

use crate::resources::rotation::Orientation;

/// World-space position in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Movement packet contents captured before the host sends them.
///
/// The host must send exactly these values; see
/// [`intercept_network_send`](crate::systems::network::intercept_network_send).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub position: Position,
    pub orientation: Orientation,
    pub on_ground: bool,
}

impl NetworkSnapshot {
    pub fn new(position: Position, orientation: Orientation, on_ground: bool) -> Self {
        Self {
            position,
            orientation,
            on_ground,
        }
    }

    /// Names of the fields that differ from `other`.
    pub fn differing_fields(&self, other: &NetworkSnapshot) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.position.x != other.position.x {
            fields.push("x");
        }
        if self.position.y != other.position.y {
            fields.push("y");
        }
        if self.position.z != other.position.z {
            fields.push("z");
        }
        if self.orientation.yaw != other.orientation.yaw {
            fields.push("yaw");
        }
        if self.orientation.pitch != other.orientation.pitch {
            fields.push("pitch");
        }
        if self.on_ground != other.on_ground {
            fields.push("on_ground");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_snapshots_have_no_differences() {
        let s = NetworkSnapshot::new(Position::new(1.0, 64.0, -3.5), Orientation::new(10.0, 5.0), true);
        assert!(s.differing_fields(&s).is_empty());
    }

    #[test]
    fn test_differing_fields_lists_each_change() {
        let a = NetworkSnapshot::new(Position::new(0.0, 64.0, 0.0), Orientation::new(0.0, 0.0), true);
        let mut b = a;
        b.position.y = 63.5;
        b.on_ground = false;
        assert_eq!(a.differing_fields(&b), vec!["y", "on_ground"]);
    }
}
