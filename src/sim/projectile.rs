//! Boss projectiles: spawning, advancing and age-based expiry

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::ground_direction;

/// A single bullet travelling in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    position: Vec3,
    /// Unit length, fixed at spawn
    direction: Vec3,
    spawn_time: f64,
}

impl Projectile {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    /// Seconds since spawn
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }
}

/// Owns every live projectile of one boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    /// Time-to-live in seconds
    lifetime: f64,
}

impl ProjectileManager {
    pub fn new(lifetime: f64) -> Self {
        Self {
            projectiles: Vec::new(),
            lifetime,
        }
    }

    /// Fire one projectile from `origin` along `direction` (normalized here)
    pub fn spawn_single(&mut self, origin: Vec3, direction: Vec3, now: f64) -> Result<(), SimError> {
        if !origin.is_finite() {
            return Err(SimError::argument("projectile origin must be finite"));
        }
        let Some(direction) = direction.try_normalize() else {
            return Err(SimError::argument(
                "projectile direction must be finite and non-zero",
            ));
        };

        self.projectiles.push(Projectile {
            position: origin,
            direction,
            spawn_time: now,
        });
        Ok(())
    }

    /// Fire `count` projectiles evenly spaced around the Y axis
    pub fn spawn_radial(&mut self, origin: Vec3, count: i32, now: f64) -> Result<(), SimError> {
        if count < 0 {
            return Err(SimError::argument(format!(
                "burst count must be non-negative, got {count}"
            )));
        }
        if !origin.is_finite() {
            return Err(SimError::argument("projectile origin must be finite"));
        }
        if count == 0 {
            return Ok(());
        }

        let step = std::f32::consts::TAU / count as f32;
        self.projectiles.reserve(count as usize);
        self.projectiles.extend((0..count).map(|i| Projectile {
            position: origin,
            direction: ground_direction(i as f32 * step),
            spawn_time: now,
        }));
        Ok(())
    }

    /// Move every projectile by `advance` along its direction, then drop the
    /// ones older than the lifetime
    pub fn tick(&mut self, now: f64, advance: f32) -> Result<(), SimError> {
        if !(advance.is_finite() && advance > 0.0) {
            return Err(SimError::argument(format!(
                "advance step must be positive, got {advance}"
            )));
        }

        for projectile in &mut self.projectiles {
            projectile.position += projectile.direction * advance;
        }

        // Strictly greater: a projectile exactly at the lifetime survives this pass
        let lifetime = self.lifetime;
        self.projectiles.retain(|p| p.age(now) <= lifetime);
        Ok(())
    }

    /// Live projectiles in spawn order
    pub fn active(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Drop every live projectile
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
