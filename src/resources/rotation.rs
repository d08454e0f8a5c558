//! Orientation override state.
//!
//! [`RotationState`] decides, once per tick, whether the orientation sent over
//! the network diverges from the one the host renders. It is a two-state
//! machine:
//!
//! - [`RotationMode::Passthrough`] – no aim request is active; transmitted and
//!   rendered orientation are the same value.
//! - [`RotationMode::Overridden`] – an [`AimRequest`] won this tick; its
//!   orientation is the *resolved* orientation and its [`AimPlan`] governs the
//!   movement fix-up.
//!
//! Nothing is sticky: [`RotationState::end_tick`] drops the active request so
//! every tick starts in passthrough unless a request is published again.
use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Yaw/pitch pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Same yaw with pitch limited to `[-limit, limit]`.
    ///
    /// A negative or NaN `limit` leaves the pitch alone.
    pub fn with_pitch_clamped(self, limit: f32) -> Self {
        if limit.is_nan() || limit < 0.0 {
            return self;
        }
        Self {
            yaw: self.yaw,
            pitch: self.pitch.clamp(-limit, limit),
        }
    }
}

/// Policy attached to an aim request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimPlan {
    /// Rotate movement input so it stays consistent with the rendered view.
    pub apply_velocity_fix: bool,
    /// Let the rendered orientation follow the resolved one.
    pub change_look: bool,
}

impl Default for AimPlan {
    fn default() -> Self {
        Self {
            apply_velocity_fix: true,
            change_look: false,
        }
    }
}

/// A request to aim somewhere for the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AimRequest {
    pub orientation: Orientation,
    pub plan: AimPlan,
    /// Who asked. Only used for diagnostics.
    pub owner: String,
}

impl AimRequest {
    pub fn new(orientation: Orientation, plan: AimPlan, owner: impl Into<String>) -> Self {
        Self {
            orientation,
            plan,
            owner: owner.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Passthrough,
    Overridden,
}

/// Per-engine rotation override state.
#[derive(Resource, Debug, Clone, Default)]
pub struct RotationState {
    pending: Option<AimRequest>,
    active: Option<AimRequest>,
    /// Memo of [`RotationState::resolve`]; `Some(_)` once read this tick.
    resolved: Option<Option<Orientation>>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a request for the next tick to begin. A later publish before
    /// that tick replaces the earlier one.
    pub fn publish(&mut self, request: AimRequest) {
        self.pending = Some(request);
    }

    /// Hand out the published request, leaving none behind.
    pub fn take_pending(&mut self) -> Option<AimRequest> {
        self.pending.take()
    }

    /// Install the request that won this tick.
    ///
    /// Ignored once the orientation has been resolved for the tick, so every
    /// reader of the tick sees the same value.
    pub fn activate(&mut self, request: Option<AimRequest>, pitch_limit: f32) {
        if self.resolved.is_some() {
            warn!("aim request arrived after the orientation was resolved, ignoring");
            return;
        }
        self.active = request.map(|mut r| {
            r.orientation = r.orientation.with_pitch_clamped(pitch_limit);
            r
        });
        if let Some(r) = &self.active {
            debug!(
                "aim override from '{}': yaw={} pitch={}",
                r.owner, r.orientation.yaw, r.orientation.pitch
            );
        }
    }

    /// The resolved orientation for this tick, or `None` for passthrough.
    pub fn resolve(&mut self) -> Option<Orientation> {
        let active = &self.active;
        *self
            .resolved
            .get_or_insert_with(|| active.as_ref().map(|r| r.orientation))
    }

    /// Plan of the active request.
    pub fn plan(&self) -> Option<&AimPlan> {
        self.active.as_ref().map(|r| &r.plan)
    }

    pub fn active(&self) -> Option<&AimRequest> {
        self.active.as_ref()
    }

    pub fn mode(&self) -> RotationMode {
        if self.active.is_some() {
            RotationMode::Overridden
        } else {
            RotationMode::Passthrough
        }
    }

    /// Orientation handed to the network path.
    pub fn transmitted(&mut self, rendered: Orientation) -> Orientation {
        self.resolve().unwrap_or(rendered)
    }

    /// Orientation the host should render.
    pub fn rendered(&mut self, rendered: Orientation) -> Orientation {
        match (self.resolve(), self.plan()) {
            (Some(resolved), Some(plan)) if plan.change_look => resolved,
            _ => rendered,
        }
    }

    /// Drop the tick's decision. Published-but-unused requests are kept.
    pub fn end_tick(&mut self) {
        self.active = None;
        self.resolved = None;
    }
}
