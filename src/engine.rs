//! Engine façade the host drives once per tick.
//!
//! ```ignore
//! let mut engine = Engine::new(EngineConfig::new());
//! let sprint = engine.add_module(SprintPolicy::new(SprintMode::Omnidirectional));
//! engine.set_module_enabled(sprint, true)?;
//!
//! loop {
//!     let movement = engine.begin_tick(frame)?;   // PreTick .. sprint intent
//!     // host physics; may call engine.push_out(..) / engine.on_move(..)
//!     engine.send_movement(&mut socket)?;         // PRE, send, POST
//!     let report = engine.end_tick()?;            // PostTick
//! }
//! ```
//!
//! Module failures never surface as `Err` here; they are logged and listed in
//! [`TickReport::diagnostics`]. `Err` is reserved for lifecycle misuse by the
//! host.
use bevy_ecs::prelude::*;
use log::debug;

use crate::error::EngineError;
use crate::events::{MoveEvent, MoveType, PushOutEvent};
use crate::modules::Module;
use crate::modules::registry::{ModuleId, ModuleRegistry};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::eventbus::EventBus;
use crate::resources::hostframe::HostFrame;
use crate::resources::rotation::{AimPlan, AimRequest, Orientation, RotationState};
use crate::resources::snapshot::{NetworkSnapshot, Position};
use crate::resources::tickstate::{MovementOutput, TickState};
use crate::systems::input_schedule;
use crate::systems::network::{self, NetworkSink, SendReport};
use crate::systems::tick::{close_tick, movement_output, open_tick};

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub movement: MovementOutput,
    /// Values the host reported as transmitted, if it sent this tick.
    pub sent: Option<NetworkSnapshot>,
    /// Everything that was logged as a failure during the tick.
    pub diagnostics: Vec<EngineError>,
}

pub struct Engine {
    world: World,
    input: Schedule,
    bus: EventBus,
    registry: ModuleRegistry,
    tick: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::new())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let bus = EventBus::new();
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(RotationState::new());
        world.insert_non_send_resource(bus.clone());
        Self {
            world,
            input: input_schedule(),
            bus,
            registry: ModuleRegistry::new(),
            tick: 0,
        }
    }

    /// Handle to the event bus, for raw `register`/`dispatch`.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &EngineConfig {
        self.world.resource::<EngineConfig>()
    }

    /// Replace the configuration wholesale. Only between ticks.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        if self.is_tick_active() {
            return Err(EngineError::TickAlreadyActive);
        }
        self.world.insert_resource(config);
        Ok(())
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Declare a module; it starts disabled.
    pub fn add_module<M: Module + 'static>(&mut self, module: M) -> ModuleId {
        self.registry.add(module)
    }

    /// Takes effect at the next `begin_tick`.
    pub fn set_module_enabled(&mut self, id: ModuleId, enabled: bool) -> Result<(), EngineError> {
        self.registry.set_enabled(id, enabled)
    }

    /// Publish an external aim decision for the next tick to begin.
    pub fn publish_aim(&mut self, request: AimRequest) {
        self.world.resource_mut::<RotationState>().publish(request);
    }

    /// [`Engine::publish_aim`] with the configured default plan.
    pub fn aim_at(&mut self, orientation: Orientation, owner: impl Into<String>) {
        let plan = self.config().aim_plan;
        self.publish_aim(AimRequest::new(orientation, plan, owner));
    }

    pub fn is_tick_active(&self) -> bool {
        self.world.contains_resource::<TickState>()
    }

    /// Number of the current (or last finished) tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Live tick record; `None` outside a tick.
    pub fn current(&self) -> Option<&TickState> {
        self.world.get_resource::<TickState>()
    }

    /// Resolved orientation of the current tick; `None` in passthrough or
    /// outside a tick.
    pub fn resolved_orientation(&mut self) -> Option<Orientation> {
        if !self.is_tick_active() {
            return None;
        }
        self.world.resource_mut::<RotationState>().resolve()
    }

    /// Plan of the current tick's aim, if any.
    pub fn active_aim_plan(&self) -> Option<AimPlan> {
        self.world.resource::<RotationState>().plan().copied()
    }

    /// Start a tick: apply module toggles, then run `PreTick` through sprint
    /// intent. Returns the movement the host should apply.
    pub fn begin_tick(&mut self, frame: HostFrame) -> Result<MovementOutput, EngineError> {
        if self.is_tick_active() {
            return Err(EngineError::TickAlreadyActive);
        }
        self.registry.apply_pending(&self.bus);
        self.tick += 1;
        open_tick(&mut self.world, self.tick, frame)?;
        self.input.run(&mut self.world);
        movement_output(&mut self.world)
    }

    /// Host is about to push the entity out of blocks. Returns whether it
    /// should go ahead.
    pub fn push_out(&mut self, x: f64, z: f64) -> Result<bool, EngineError> {
        if !self.is_tick_active() {
            return Err(EngineError::TickNotActive);
        }
        let event = self.bus.emit(PushOutEvent::new(x, z));
        Ok(!event.cancelled)
    }

    /// Host moved the entity.
    pub fn on_move(&mut self, move_type: MoveType, movement: Position) -> Result<(), EngineError> {
        if !self.is_tick_active() {
            return Err(EngineError::TickNotActive);
        }
        self.bus.emit(MoveEvent {
            move_type,
            movement,
        });
        Ok(())
    }

    /// Snapshot the host must send this tick.
    pub fn capture_pre(&mut self) -> Result<NetworkSnapshot, EngineError> {
        network::capture_pre(&mut self.world)
    }

    /// Report what the host actually sent.
    pub fn capture_post(&mut self, sent: NetworkSnapshot) -> Result<SendReport, EngineError> {
        network::capture_post(&mut self.world, sent)
    }

    /// Capture, send through `sink`, report.
    pub fn send_movement(&mut self, sink: &mut dyn NetworkSink) -> Result<SendReport, EngineError> {
        network::intercept_network_send(&mut self.world, sink)
    }

    /// Fire `PostTick` and discard everything scoped to the tick.
    pub fn end_tick(&mut self) -> Result<TickReport, EngineError> {
        if !self.is_tick_active() {
            return Err(EngineError::TickNotActive);
        }
        let (movement, sent) = close_tick(&mut self.world)?;
        let diagnostics = self.bus.drain_diagnostics();
        if !diagnostics.is_empty() {
            debug!("tick {} finished with {} diagnostics", movement.tick, diagnostics.len());
        }
        Ok(TickReport {
            movement,
            sent,
            diagnostics,
        })
    }

    /// All stages of one tick in order, sending through `sink`.
    pub fn run_tick(
        &mut self,
        frame: HostFrame,
        sink: &mut dyn NetworkSink,
    ) -> Result<TickReport, EngineError> {
        self.begin_tick(frame)?;
        self.send_movement(sink)?;
        self.end_tick()
    }
}
