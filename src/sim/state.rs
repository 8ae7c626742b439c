//! Boss state and core simulation types
//!
//! Everything the controller mutates between ticks lives here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::timer::TimerHandle;

/// Which attack the boss uses on its next decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackState {
    /// Radial bursts until the cooldown threshold
    #[default]
    Bursting,
    /// Single aimed shots until the cooldown timer fires
    Cooldown,
}

/// Movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// Walking toward the player every tick
    #[default]
    Chasing,
    /// Frozen next to the player, dash pending
    Paused,
    /// Mid-dash (only observable inside the dash itself)
    Dashing,
}

/// Something that happened during a tick, for hosts (audio, VFX, logs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossEvent {
    BurstFired { count: i32 },
    AimedShotFired { direction: Vec3 },
    CooldownStarted,
    CooldownEnded,
    Paused,
    Dashed { from: Vec3, to: Vec3 },
    PlayerHit,
}

/// The boss entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub position: Vec3,
    pub attack_state: AttackState,
    /// Bursts fired since the last cooldown
    pub burst_count: u32,
    /// Simulation time of the last attack decision
    pub last_attack_time: f64,
    pub motion_state: MotionState,
    /// Pending pause -> dash transition
    #[serde(skip)]
    pub dash_timer: Option<TimerHandle>,
    /// Pending cooldown -> bursting transition
    #[serde(skip)]
    pub cooldown_timer: Option<TimerHandle>,
}

impl Boss {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            attack_state: AttackState::Bursting,
            burst_count: 0,
            last_attack_time: 0.0,
            motion_state: MotionState::Chasing,
            dash_timer: None,
            cooldown_timer: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.motion_state == MotionState::Paused
    }

    #[inline]
    pub fn distance_to(&self, target: Vec3) -> f32 {
        self.position.distance(target)
    }

    /// Unit vector toward `target`, zero when already on top of it
    #[inline]
    pub fn heading_to(&self, target: Vec3) -> Vec3 {
        (target - self.position).normalize_or_zero()
    }
}

/// What a single tick produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Simulation time at the end of the tick
    pub time: f64,
    pub events: Vec<BossEvent>,
}

impl TickReport {
    /// Number of player-hit events this tick
    pub fn hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BossEvent::PlayerHit))
            .count()
    }

    pub fn contains(&self, event: &BossEvent) -> bool {
        self.events.contains(event)
    }
}
