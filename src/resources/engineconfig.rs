//! Engine configuration resource.
//!
//! Holds the host defaults the input stages start from and the default
//! [`AimPlan`]. Loaded from an INI file; missing values keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [movement]
//! step = 1.0
//! sneak_multiplier = 0.3
//! use_multiplier = 0.2
//! walking_threshold = 0.8
//! epsilon = 0.00001
//!
//! [aim]
//! apply_velocity_fix = true
//! change_look = false
//! pitch_limit = 90.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::rotation::AimPlan;

/// Default safe values for startup
const DEFAULT_MOVEMENT_STEP: f32 = 1.0;
const DEFAULT_SNEAK_MULTIPLIER: f32 = 0.3;
const DEFAULT_USE_MULTIPLIER: f32 = 0.2;
const DEFAULT_WALKING_THRESHOLD: f32 = 0.8;
const DEFAULT_MOVEMENT_EPSILON: f32 = 1.0e-5;
const DEFAULT_PITCH_LIMIT: f32 = 90.0;
const DEFAULT_CONFIG_PATH: &str = "./tickover.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Granularity rotated movement input is rounded to.
    pub movement_step: f32,
    /// Host's default sneaking speed factor.
    pub sneak_multiplier: f32,
    /// Host's default slowdown while an item is in use, on both axes.
    pub use_multiplier: f32,
    /// Axis magnitude at which the host counts the entity as walking.
    pub walking_threshold: f32,
    /// Axis magnitude above which an axis counts as moving at all.
    pub movement_epsilon: f32,
    /// Resolved pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
    /// Plan used by aim requests that don't bring their own.
    pub aim_plan: AimPlan,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            movement_step: DEFAULT_MOVEMENT_STEP,
            sneak_multiplier: DEFAULT_SNEAK_MULTIPLIER,
            use_multiplier: DEFAULT_USE_MULTIPLIER,
            walking_threshold: DEFAULT_WALKING_THRESHOLD,
            movement_epsilon: DEFAULT_MOVEMENT_EPSILON,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            aim_plan: AimPlan::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: step={}, sneak={}, use={}, walking={}, velocity_fix={}, change_look={}",
            self.movement_step,
            self.sneak_multiplier,
            self.use_multiplier,
            self.walking_threshold,
            self.aim_plan.apply_velocity_fix,
            self.aim_plan.change_look
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [movement] section
        if let Some(step) = float("movement", "step") {
            if step > 0.0 {
                self.movement_step = step as f32;
            }
        }
        if let Some(v) = float("movement", "sneak_multiplier") {
            self.sneak_multiplier = v as f32;
        }
        if let Some(v) = float("movement", "use_multiplier") {
            self.use_multiplier = v as f32;
        }
        if let Some(v) = float("movement", "walking_threshold") {
            self.walking_threshold = v as f32;
        }
        if let Some(v) = float("movement", "epsilon") {
            self.movement_epsilon = v as f32;
        }

        // [aim] section
        if let Some(v) = config.getbool("aim", "apply_velocity_fix").ok().flatten() {
            self.aim_plan.apply_velocity_fix = v;
        }
        if let Some(v) = config.getbool("aim", "change_look").ok().flatten() {
            self.aim_plan.change_look = v;
        }
        if let Some(v) = float("aim", "pitch_limit") {
            if v.is_finite() && v >= 0.0 {
                self.pitch_limit = v as f32;
            } else {
                warn!("Ignoring invalid pitch_limit {}", v);
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [movement] section
        config.set("movement", "step", Some(self.movement_step.to_string()));
        config.set("movement", "sneak_multiplier", Some(self.sneak_multiplier.to_string()));
        config.set("movement", "use_multiplier", Some(self.use_multiplier.to_string()));
        config.set("movement", "walking_threshold", Some(self.walking_threshold.to_string()));
        config.set("movement", "epsilon", Some(self.movement_epsilon.to_string()));

        // [aim] section
        config.set("aim", "apply_velocity_fix", Some(self.aim_plan.apply_velocity_fix.to_string()));
        config.set("aim", "change_look", Some(self.aim_plan.change_look.to_string()));
        config.set("aim", "pitch_limit", Some(self.pitch_limit.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
