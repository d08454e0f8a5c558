//! Network movement snapshot events.
//!
//! [`NetworkMovementPreEvent`] fires before the host sends its movement
//! packet. Every field of the snapshot has its own slot, so handlers that
//! rewrite different fields never displace each other; the snapshot built
//! from the slots afterwards is what the host must send.
//! [`NetworkMovementPostEvent`] fires after the send with the values the host
//! reports as transmitted.
use crate::events::slot::ResultSlot;
use crate::resources::rotation::Orientation;
use crate::resources::snapshot::{NetworkSnapshot, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkMovementPreEvent {
    /// Values the host was about to send.
    pub captured: NetworkSnapshot,
    pub x: ResultSlot<f64>,
    pub y: ResultSlot<f64>,
    pub z: ResultSlot<f64>,
    pub yaw: ResultSlot<f32>,
    pub pitch: ResultSlot<f32>,
    pub on_ground: ResultSlot<bool>,
    pub cancelled: bool,
}

impl NetworkMovementPreEvent {
    pub fn new(captured: NetworkSnapshot) -> Self {
        Self {
            captured,
            x: ResultSlot::new(captured.position.x),
            y: ResultSlot::new(captured.position.y),
            z: ResultSlot::new(captured.position.z),
            yaw: ResultSlot::new(captured.orientation.yaw),
            pitch: ResultSlot::new(captured.orientation.pitch),
            on_ground: ResultSlot::new(captured.on_ground),
            cancelled: false,
        }
    }

    /// Claim all three coordinates.
    pub fn set_position(&mut self, position: Position) {
        self.x.set(position.x);
        self.y.set(position.y);
        self.z.set(position.z);
    }

    /// Claim yaw and pitch.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.yaw.set(orientation.yaw);
        self.pitch.set(orientation.pitch);
    }

    /// The snapshot as it stands after the handlers that ran so far.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::new(
            Position::new(self.x.value(), self.y.value(), self.z.value()),
            Orientation::new(self.yaw.value(), self.pitch.value()),
            self.on_ground.value(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkMovementPostEvent {
    pub pre: NetworkSnapshot,
    pub sent: NetworkSnapshot,
}

impl NetworkMovementPostEvent {
    /// Whether the host transmitted something other than the PRE snapshot.
    pub fn is_consistent(&self) -> bool {
        self.pre == self.sent
    }
}
