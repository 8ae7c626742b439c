//! Read-only view of the encounter for an external renderer
//!
//! Built once per frame after the tick; the renderer never writes back.

use glam::Vec3;
use serde::Serialize;

pub use crate::sim::HealthBar;
use crate::sim::{AttackState, BossController, MotionState};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossSnapshot {
    pub time: f64,
    pub boss_position: Vec3,
    pub health: i32,
    pub health_bar: HealthBar,
    pub attack_state: AttackState,
    pub motion_state: MotionState,
    /// True while the boss is frozen before a dash
    pub paused: bool,
    /// Boss -> player line drawn while paused
    pub indicator_line: Option<(Vec3, Vec3)>,
    pub projectiles: Vec<Vec3>,
}

impl BossSnapshot {
    pub fn capture(controller: &BossController) -> Self {
        let boss = controller.boss();
        let paused = boss.is_paused();
        let indicator_line = if paused {
            controller.last_player().map(|player| (boss.position, player))
        } else {
            None
        };

        Self {
            time: controller.time(),
            boss_position: boss.position,
            health: controller.health().health(),
            health_bar: controller.health().health_bar(),
            attack_state: boss.attack_state,
            motion_state: boss.motion_state,
            paused,
            indicator_line,
            projectiles: controller
                .projectiles()
                .active()
                .iter()
                .map(|p| p.position())
                .collect(),
        }
    }

    /// Serialize for hosts that consume JSON frames
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
