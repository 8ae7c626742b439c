//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One authoritative clock (advanced by the host's dt)
//! - Delayed transitions go through `TimerQueue`, never wall-clock callbacks
//! - Stable iteration order (spawn order for projectiles)
//! - No rendering or platform dependencies

pub mod health;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod timer;

pub use health::{HealthBar, HealthModel};
pub use projectile::{Projectile, ProjectileManager};
pub use state::{AttackState, Boss, BossEvent, MotionState, TickReport};
pub use tick::BossController;
pub use timer::{TimerHandle, TimerQueue, Transition};
