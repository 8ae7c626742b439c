//! Encounter balance knobs
//!
//! Defaults come from `consts`; any subset can be overridden from JSON.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// All gameplay numbers for one boss encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    // === Movement ===
    /// Where the boss spawns
    pub start_position: Vec3,
    /// Chase distance per tick
    pub chase_step: f32,
    /// Distance below which boss and player are in contact
    pub contact_radius: f32,

    // === Pause / dash ===
    /// Seconds the boss holds still before dashing
    pub pause_duration: f64,
    /// Dash displacement toward the player
    pub dash_distance: f32,

    // === Attacks ===
    /// Seconds between attack decisions
    pub attack_interval: f64,
    /// Bursts before the boss switches to aimed shots
    pub bursts_before_cooldown: u32,
    /// Projectiles per burst
    pub burst_size: i32,
    /// Seconds spent in cooldown
    pub cooldown_duration: f64,

    // === Projectiles ===
    pub projectile_advance: f32,
    pub projectile_lifetime: f64,

    /// Starting health, at most `MAX_HEALTH`
    pub max_health: i32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            start_position: Vec3::from_array(BOSS_START),
            chase_step: CHASE_STEP,
            contact_radius: CONTACT_RADIUS,

            pause_duration: PAUSE_DURATION,
            dash_distance: DASH_DISTANCE,

            attack_interval: ATTACK_INTERVAL,
            bursts_before_cooldown: BURSTS_BEFORE_COOLDOWN,
            burst_size: BURST_SIZE,
            cooldown_duration: COOLDOWN_DURATION,

            projectile_advance: PROJECTILE_ADVANCE,
            projectile_lifetime: PROJECTILE_LIFETIME,

            max_health: MAX_HEALTH,
        }
    }
}

impl BossTuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|source| SimError::ParseConfig { source })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: &str| {
            Err(SimError::InvalidConfig {
                reason: reason.to_string(),
            })
        };

        if !self.start_position.is_finite() {
            return invalid("start_position must be finite");
        }
        if !(self.chase_step.is_finite() && self.chase_step >= 0.0) {
            return invalid("chase_step must be a non-negative number");
        }
        if !(self.contact_radius.is_finite() && self.contact_radius > 0.0) {
            return invalid("contact_radius must be positive");
        }
        if !(self.pause_duration.is_finite() && self.pause_duration >= 0.0) {
            return invalid("pause_duration must be non-negative");
        }
        if !self.dash_distance.is_finite() {
            return invalid("dash_distance must be finite");
        }
        if !(self.attack_interval.is_finite() && self.attack_interval >= 0.0) {
            return invalid("attack_interval must be non-negative");
        }
        if self.bursts_before_cooldown == 0 {
            return invalid("bursts_before_cooldown must be at least 1");
        }
        if self.burst_size < 0 {
            return invalid("burst_size must be non-negative");
        }
        if !(self.cooldown_duration.is_finite() && self.cooldown_duration >= 0.0) {
            return invalid("cooldown_duration must be non-negative");
        }
        if !(self.projectile_advance.is_finite() && self.projectile_advance > 0.0) {
            return invalid("projectile_advance must be positive");
        }
        if !(self.projectile_lifetime.is_finite() && self.projectile_lifetime >= 0.0) {
            return invalid("projectile_lifetime must be non-negative");
        }
        if !(1..=MAX_HEALTH).contains(&self.max_health) {
            return invalid("max_health must be within 1..=100");
        }
        Ok(())
    }
}
