//! Boss health: a clamped counter plus the geometry of its health bar

use serde::{Deserialize, Serialize};

use crate::consts::{HEALTH_BAR_ELEVATION, HEALTH_BAR_HEIGHT, HEALTH_BAR_WIDTH, MAX_HEALTH};
use crate::error::SimError;

/// Health bar geometry relative to the boss origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    /// Health in [0, 1]
    pub fraction: f32,
    pub background_width: f32,
    pub foreground_width: f32,
    /// X offset of the foreground centre
    pub foreground_offset_x: f32,
    pub height: f32,
    /// Y offset above the boss
    pub elevation: f32,
}

/// Health in `[0, MAX_HEALTH]`; only `apply_damage` lowers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthModel {
    health: i32,
    max: i32,
}

impl HealthModel {
    /// Starting health, clamped to `1..=MAX_HEALTH`
    pub fn new(max: i32) -> Self {
        let max = max.clamp(1, MAX_HEALTH);
        Self { health: max, max }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Subtract `amount`, flooring at zero
    pub fn apply_damage(&mut self, amount: i32) -> Result<(), SimError> {
        if amount < 0 {
            return Err(SimError::argument(format!(
                "damage must be non-negative, got {amount}"
            )));
        }
        self.health = self.health.saturating_sub(amount).max(0);
        Ok(())
    }

    /// Health as a fraction of `MAX_HEALTH`, in [0, 1]
    pub fn fraction(&self) -> f32 {
        self.health as f32 / MAX_HEALTH as f32
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Bar geometry relative to the boss origin. The foreground shrinks
    /// toward the left edge, which stays at `-width / 2`.
    pub fn health_bar(&self) -> HealthBar {
        let fraction = self.fraction();
        let half = HEALTH_BAR_WIDTH / 2.0;
        HealthBar {
            fraction,
            background_width: HEALTH_BAR_WIDTH,
            foreground_width: fraction * HEALTH_BAR_WIDTH,
            foreground_offset_x: -half + fraction * half,
            height: HEALTH_BAR_HEIGHT,
            elevation: HEALTH_BAR_ELEVATION,
        }
    }
}
