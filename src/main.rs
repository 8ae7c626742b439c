//! Boss Arena headless driver
//!
//! Runs one encounter against a scripted player with a fixed-timestep loop
//! and prints the final render snapshot as JSON.
//!
//! Usage: `boss-arena [tuning.json] [seconds]`

use glam::Vec3;

use boss_arena::consts::{MAX_SUBSTEPS, SIM_DT};
use boss_arena::sim::{BossController, BossEvent};
use boss_arena::{BossSnapshot, BossTuning, SimError};

/// Frame time fed to the loop (a ~50 Hz host, so substeps vary)
const FRAME_DT: f64 = 0.02;

/// Player circling the arena origin, drifting in and out of reach
fn scripted_player(t: f64) -> Vec3 {
    let t = t as f32;
    let radius = 4.0 + 3.0 * (t * 0.3).sin();
    Vec3::new(radius * (t * 0.5).cos(), 0.0, radius * (t * 0.5).sin())
}

/// Fixed-timestep accumulator around the controller
struct Driver {
    controller: BossController,
    accumulator: f64,
    player_hits: u32,
}

impl Driver {
    fn new(controller: BossController) -> Self {
        Self {
            controller,
            accumulator: 0.0,
            player_hits: 0,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f64) -> Result<(), SimError> {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let player = scripted_player(self.controller.time());
            let hits = &mut self.player_hits;
            let report = self.controller.tick(player, SIM_DT, || *hits += 1)?;
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &report.events {
                match event {
                    BossEvent::BurstFired { count } => {
                        log::info!("t={:.2} burst of {}", report.time, count)
                    }
                    BossEvent::CooldownStarted => log::info!("t={:.2} cooldown", report.time),
                    BossEvent::CooldownEnded => log::info!("t={:.2} bursting again", report.time),
                    BossEvent::Dashed { from, to } => {
                        log::info!("t={:.2} dash {} -> {}", report.time, from, to)
                    }
                    BossEvent::PlayerHit => log::info!("t={:.2} player hit", report.time),
                    BossEvent::Paused | BossEvent::AimedShotFired { .. } => {}
                }
            }
        }
        Ok(())
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => BossTuning::load(path)?,
        None => BossTuning::default(),
    };
    let seconds: f64 = match args.next() {
        Some(s) => s.parse()?,
        None => 30.0,
    };

    let mut driver = Driver::new(BossController::new(tuning)?);
    log::info!("Encounter starting ({seconds}s)");

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for frame in 0..frames {
        driver.update(FRAME_DT)?;

        // Chip damage every simulated second, as a stand-in for player attacks
        if frame % 50 == 49 {
            driver.controller.apply_damage(3)?;
        }
    }

    let snapshot = BossSnapshot::capture(&driver.controller);
    driver.controller.end_encounter();

    log::info!(
        "Encounter over: {} player hits, boss health {}, {} projectiles live",
        driver.player_hits,
        snapshot.health,
        snapshot.projectiles.len()
    );
    println!("{}", snapshot.to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Boss Arena (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
