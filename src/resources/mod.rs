//! Resources held by the engine world.
//!
//! This module groups the long-lived and per-tick data the tick stages read
//! and write. Each submodule documents the semantics and intended usage of
//! its resource(s).
//!
//! Overview
//! - `engineconfig` – host defaults and the default aim plan, loaded from INI
//! - `eventbus` – priority-ordered synchronous dispatcher (non-send)
//! - `hostframe` – values the host provides at the start of a tick
//! - `input` – directional keys and the canonical axis rule
//! - `rotation` – orientation override state machine
//! - `snapshot` – network movement snapshot
//! - `tickstate` – the per-tick working record
pub mod engineconfig;
pub mod eventbus;
pub mod hostframe;
pub mod input;
pub mod rotation;
pub mod snapshot;
pub mod tickstate;
