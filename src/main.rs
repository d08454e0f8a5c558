//! Tickover demo host.
//!
//! Drives the engine with a headless scripted host: seeded random keys, a
//! slowly turning camera, a loopback "socket" that echoes (and optionally
//! clamps) what it is asked to send.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --ticks 40 --modules sprint,stop-moving --aim-yaw 90 --json
//! ```
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use tickover::engine::Engine;
use tickover::modules::fixedaim::FixedAimPolicy;
use tickover::modules::nopush::NoPushPolicy;
use tickover::modules::noslow::NoSlowPolicy;
use tickover::modules::sprint::{SprintMode, SprintPolicy};
use tickover::modules::stopmoving::StopMovingPolicy;
use tickover::resources::engineconfig::EngineConfig;
use tickover::resources::hostframe::HostFrame;
use tickover::resources::input::{DirectionalInput, PlayerInput};
use tickover::resources::rotation::Orientation;
use tickover::resources::snapshot::{NetworkSnapshot, Position};
use tickover::systems::network::NetworkSink;

/// Tickover demo host
#[derive(Parser)]
#[command(version, about = "Runs a scripted host against the tick override engine")]
struct Cli {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 20)]
    ticks: u64,

    /// Seed for the scripted input.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Built-in modules to enable: sprint, stop-moving, no-slow, no-push, fixed-aim.
    #[arg(long, value_delimiter = ',')]
    modules: Vec<String>,

    /// Yaw to aim at. Published by the host unless fixed-aim is enabled.
    #[arg(long, allow_hyphen_values = true)]
    aim_yaw: Option<f32>,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    aim_pitch: f32,

    /// Make the loopback socket refuse to send y below this value.
    #[arg(long, allow_hyphen_values = true)]
    clamp_y: Option<f64>,

    /// Print one JSON line per tick.
    #[arg(long)]
    json: bool,
}

struct LoopbackSink {
    clamp_y: Option<f64>,
}

impl NetworkSink for LoopbackSink {
    fn send_movement(&mut self, snapshot: &NetworkSnapshot) -> NetworkSnapshot {
        let mut sent = *snapshot;
        if let Some(min_y) = self.clamp_y {
            sent.position.y = sent.position.y.max(min_y);
        }
        sent
    }
}

struct ScriptedHost {
    rng: fastrand::Rng,
    position: Position,
    yaw: f32,
}

impl ScriptedHost {
    fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            position: Position::new(0.0, 64.0, 0.0),
            yaw: 0.0,
        }
    }

    fn frame(&mut self) -> HostFrame {
        let directional = DirectionalInput::new(
            self.rng.u8(0..4) != 0,
            self.rng.u8(0..8) == 0,
            self.rng.bool(),
            self.rng.u8(0..4) == 0,
        );
        let input = PlayerInput {
            directional,
            jump: self.rng.u8(0..10) == 0,
            sneak: self.rng.u8(0..6) == 0,
            sprint: self.rng.bool(),
        };
        self.yaw = (self.yaw + self.rng.f32() * 10.0 - 5.0).rem_euclid(360.0);
        HostFrame::default()
            .with_input(input)
            .with_rendered(Orientation::new(self.yaw, 0.0))
            .with_position(self.position)
            .with_on_ground(!input.jump)
            .with_using_item(self.rng.u8(0..8) == 0)
    }

    fn step(&mut self, forward: f32, sideways: f32, yaw: f32) -> Position {
        let (sin, cos) = yaw.to_radians().sin_cos();
        let dx = f64::from(sideways * cos - forward * sin) * 0.1;
        let dz = f64::from(forward * cos + sideways * sin) * 0.1;
        self.position.x += dx;
        self.position.z += dz;
        Position::new(dx, 0.0, dz)
    }
}

fn build_engine(cli: &Cli) -> Engine {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path.clone()),
        None => EngineConfig::new(),
    };
    if cli.config.is_some() {
        if let Err(e) = config.load_from_file() {
            warn!("Config not loaded, using defaults: {}", e);
        }
    }

    let aim_plan = config.aim_plan;
    let mut engine = Engine::new(config);
    for name in &cli.modules {
        let id = match name.as_str() {
            "sprint" => engine.add_module(SprintPolicy::new(SprintMode::Omnidirectional)),
            "stop-moving" => engine.add_module(StopMovingPolicy::new(false)),
            "no-slow" => engine.add_module(NoSlowPolicy::default()),
            "no-push" => engine.add_module(NoPushPolicy),
            "fixed-aim" => engine.add_module(FixedAimPolicy::new(
                Orientation::new(cli.aim_yaw.unwrap_or(0.0), cli.aim_pitch),
                aim_plan,
            )),
            other => {
                warn!("Unknown module '{}', skipping", other);
                continue;
            }
        };
        if let Err(e) = engine.set_module_enabled(id, true) {
            error!("Failed to enable '{}': {}", name, e);
        }
    }
    engine
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut engine = build_engine(&cli);
    let host_aims = cli.aim_yaw.is_some() && !cli.modules.iter().any(|m| m == "fixed-aim");
    let mut host = ScriptedHost::new(cli.seed);
    let mut sink = LoopbackSink { clamp_y: cli.clamp_y };

    info!("Running {} ticks with {} modules", cli.ticks, engine.registry().len());
    for _ in 0..cli.ticks {
        if host_aims {
            engine.aim_at(
                Orientation::new(cli.aim_yaw.unwrap_or(0.0), cli.aim_pitch),
                "host",
            );
        }

        let frame = host.frame();
        let movement = match engine.begin_tick(frame) {
            Ok(movement) => movement,
            Err(e) => {
                error!("Tick not started: {}", e);
                break;
            }
        };

        let pushed = engine.push_out(host.position.x, host.position.z).unwrap_or(true);
        let delta = host.step(movement.forward, movement.sideways, movement.rendered.yaw);
        if let Err(e) = engine.on_move(tickover::events::MoveType::SelfMove, delta) {
            error!("{}", e);
        }
        if let Err(e) = engine.send_movement(&mut sink) {
            error!("Movement not sent: {}", e);
        }

        let report = match engine.end_tick() {
            Ok(report) => report,
            Err(e) => {
                error!("Tick not finished: {}", e);
                break;
            }
        };

        if cli.json {
            let line = serde_json::json!({
                "movement": report.movement,
                "sent": report.sent,
                "push_out": pushed,
                "diagnostics": report
                    .diagnostics
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>(),
            });
            println!("{}", line);
        } else {
            info!(
                "tick {:>4}: forward={:+.2} sideways={:+.2} sprint={} yaw rendered={:.1} sent={:.1} diagnostics={}",
                report.movement.tick,
                report.movement.forward,
                report.movement.sideways,
                report.movement.sprinting,
                report.movement.rendered.yaw,
                report.movement.transmitted.yaw,
                report.diagnostics.len()
            );
        }
    }
}
