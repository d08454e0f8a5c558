//! Tick-synchronized state-override engine.
//!
//! Sits on top of a host simulation loop and lets independently configured
//! modules rewrite the per-tick movement input, orientation and outgoing
//! network snapshot at fixed extension points, in a deterministic order.
//!
//! - [`engine`] – the façade the host drives each tick
//! - [`events`] – extension point payloads
//! - [`modules`] – module trait, registry and built-in policies
//! - [`resources`] – event bus, tick state, rotation state, configuration
//! - [`systems`] – the tick stages

pub mod engine;
pub mod error;
pub mod events;
pub mod modules;
pub mod resources;
pub mod systems;

pub use engine::{Engine, TickReport};
pub use error::{EngineError, HandlerError, HandlerResult};
