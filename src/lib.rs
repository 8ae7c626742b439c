//! Boss Arena - a boss encounter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boss state machine, projectiles, health, timers)
//! - `tuning`: Data-driven encounter balance
//! - `snapshot`: Read-only view handed to an external renderer
//! - `error`: Typed failures surfaced to the host loop

pub mod error;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::SimError;
pub use snapshot::{BossSnapshot, HealthBar};
pub use tuning::BossTuning;

use glam::Vec3;

/// Encounter configuration constants (defaults for `BossTuning`)
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Boss spawn point
    pub const BOSS_START: [f32; 3] = [5.0, 0.0, 5.0];
    /// Chase distance per tick
    pub const CHASE_STEP: f32 = 0.05;
    /// Boss-to-player distance that counts as contact
    pub const CONTACT_RADIUS: f32 = 1.0;

    /// Pause before the dash (seconds)
    pub const PAUSE_DURATION: f64 = 1.0;
    /// Dash displacement (distance units)
    pub const DASH_DISTANCE: f32 = 5.0;

    /// Seconds between attack decisions
    pub const ATTACK_INTERVAL: f64 = 2.0;
    /// Bursts fired before entering cooldown
    pub const BURSTS_BEFORE_COOLDOWN: u32 = 3;
    /// Projectiles per radial burst
    pub const BURST_SIZE: i32 = 60;
    /// Cooldown length (seconds)
    pub const COOLDOWN_DURATION: f64 = 5.0;

    /// Projectile advance per tick (distance units)
    pub const PROJECTILE_ADVANCE: f32 = 0.1;
    /// Projectile time-to-live (seconds)
    pub const PROJECTILE_LIFETIME: f64 = 5.0;

    /// Full health
    pub const MAX_HEALTH: i32 = 100;
    /// Health bar background width (world units)
    pub const HEALTH_BAR_WIDTH: f32 = 2.0;
    /// Health bar thickness
    pub const HEALTH_BAR_HEIGHT: f32 = 0.2;
    /// Height of the health bar above the boss origin
    pub const HEALTH_BAR_ELEVATION: f32 = 2.0;
}

/// Direction on the ground plane (XZ) for an angle in radians
#[inline]
pub fn ground_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, theta.sin())
}

/// True when every component is finite (no NaN / infinity)
#[inline]
pub fn is_well_formed(v: Vec3) -> bool {
    v.is_finite()
}
