//! Per-tick boss controller
//!
//! Advances the encounter deterministically: one call per host frame, with
//! all delayed transitions (pause -> dash, cooldown -> bursting) driven by the
//! same simulation clock as the attack cadence.

use glam::Vec3;

use super::health::HealthModel;
use super::projectile::ProjectileManager;
use super::state::{AttackState, Boss, BossEvent, MotionState, TickReport};
use super::timer::{TimerQueue, Transition};
use crate::error::SimError;
use crate::is_well_formed;
use crate::tuning::BossTuning;

/// Drives one boss through an encounter
#[derive(Debug, Clone)]
pub struct BossController {
    boss: Boss,
    health: HealthModel,
    projectiles: ProjectileManager,
    timers: TimerQueue,
    tuning: BossTuning,
    /// Simulation clock (seconds since encounter start)
    time: f64,
    /// Player position seen on the last tick, for the pause indicator
    last_player: Option<Vec3>,
    ended: bool,
}

impl BossController {
    pub fn new(tuning: BossTuning) -> Result<Self, SimError> {
        tuning.validate()?;
        Ok(Self {
            boss: Boss::new(tuning.start_position),
            health: HealthModel::new(tuning.max_health),
            projectiles: ProjectileManager::new(tuning.projectile_lifetime),
            timers: TimerQueue::new(),
            tuning,
            time: 0.0,
            last_player: None,
            ended: false,
        })
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn health(&self) -> &HealthModel {
        &self.health
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn last_player(&self) -> Option<Vec3> {
        self.last_player
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Zero health is reported only; the boss keeps fighting until the host
    /// ends the encounter.
    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn apply_damage(&mut self, amount: i32) -> Result<(), SimError> {
        self.health.apply_damage(amount)?;
        if self.health.is_depleted() {
            log::info!("Boss health depleted at t={:.2}", self.time);
        }
        Ok(())
    }

    /// Tear down the encounter: cancel every pending transition so nothing
    /// fires against a removed boss, and drop live projectiles. Idempotent.
    pub fn end_encounter(&mut self) {
        if self.ended {
            return;
        }
        if let Some(handle) = self.boss.dash_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.boss.cooldown_timer.take() {
            self.timers.cancel(handle);
        }
        self.timers.clear();
        self.projectiles.clear();
        self.ended = true;
        log::info!("Encounter ended at t={:.2}", self.time);
    }

    /// Advance the encounter by `dt` seconds.
    ///
    /// `on_player_hit` is called once per contact event (after a chase step or
    /// a dash). Invalid input is rejected before any state changes.
    pub fn tick(
        &mut self,
        player: Vec3,
        dt: f64,
        mut on_player_hit: impl FnMut(),
    ) -> Result<TickReport, SimError> {
        if self.ended {
            return Err(SimError::EncounterEnded);
        }
        if !is_well_formed(player) {
            return Err(SimError::input(format!(
                "player position {player} has non-finite components"
            )));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::argument(format!("dt must be positive, got {dt}")));
        }

        self.time += dt;
        self.last_player = Some(player);
        let now = self.time;
        let mut report = TickReport {
            time: now,
            events: Vec::new(),
        };

        // Scheduled transitions land before this tick reads any state
        let mut dashed = false;
        for (handle, transition) in self.timers.drain_due(now) {
            match transition {
                Transition::BeginDash => {
                    if self.boss.dash_timer != Some(handle) {
                        log::warn!("Dropping stale dash timer {:?}", handle);
                        continue;
                    }
                    self.boss.dash_timer = None;
                    dashed = true;
                    if self.dash(player, &mut report) {
                        on_player_hit();
                        report.events.push(BossEvent::PlayerHit);
                    }
                }
                Transition::EndCooldown => {
                    if self.boss.cooldown_timer != Some(handle) {
                        log::warn!("Dropping stale cooldown timer {:?}", handle);
                        continue;
                    }
                    self.boss.cooldown_timer = None;
                    self.boss.attack_state = AttackState::Bursting;
                    report.events.push(BossEvent::CooldownEnded);
                    log::debug!("Cooldown over at t={now:.2}");
                }
            }
        }

        // Chase (the dash counts as this tick's movement)
        if !dashed && self.boss.motion_state == MotionState::Chasing {
            let heading = self.boss.heading_to(player);
            self.boss.position += heading * self.tuning.chase_step;
            if self.in_contact(player) {
                on_player_hit();
                report.events.push(BossEvent::PlayerHit);
            }
        }

        // Close enough: freeze and line up a dash
        if self.boss.motion_state == MotionState::Chasing
            && self.boss.dash_timer.is_none()
            && self.in_contact(player)
        {
            self.boss.motion_state = MotionState::Paused;
            let handle = self
                .timers
                .schedule(now + self.tuning.pause_duration, Transition::BeginDash);
            self.boss.dash_timer = Some(handle);
            report.events.push(BossEvent::Paused);
            log::debug!("Boss paused at t={now:.2}, dash pending");
        }

        // A pause suspends attacks; projectiles keep flying
        if !self.boss.is_paused() && now - self.boss.last_attack_time > self.tuning.attack_interval
        {
            self.boss.last_attack_time = now;
            self.attack(player, now, &mut report)?;
        }

        self.projectiles.tick(now, self.tuning.projectile_advance)?;

        Ok(report)
    }

    fn in_contact(&self, player: Vec3) -> bool {
        self.boss.distance_to(player) < self.tuning.contact_radius
    }

    /// Instant displacement toward where the player is now.
    /// Returns true if the boss lands in contact.
    fn dash(&mut self, player: Vec3, report: &mut TickReport) -> bool {
        self.boss.motion_state = MotionState::Dashing;

        let from = self.boss.position;
        self.boss.position += self.boss.heading_to(player) * self.tuning.dash_distance;
        report.events.push(BossEvent::Dashed {
            from,
            to: self.boss.position,
        });
        log::debug!("Boss dashed {} -> {}", from, self.boss.position);

        let hit = self.in_contact(player);
        self.boss.motion_state = MotionState::Chasing;
        hit
    }

    fn attack(&mut self, player: Vec3, now: f64, report: &mut TickReport) -> Result<(), SimError> {
        let origin = self.boss.position;
        match self.boss.attack_state {
            AttackState::Bursting => {
                let count = self.tuning.burst_size;
                self.projectiles.spawn_radial(origin, count, now)?;
                self.boss.burst_count += 1;
                report.events.push(BossEvent::BurstFired { count });

                if self.boss.burst_count >= self.tuning.bursts_before_cooldown {
                    self.boss.attack_state = AttackState::Cooldown;
                    self.boss.burst_count = 0;
                    let handle = self
                        .timers
                        .schedule(now + self.tuning.cooldown_duration, Transition::EndCooldown);
                    self.boss.cooldown_timer = Some(handle);
                    report.events.push(BossEvent::CooldownStarted);
                    log::debug!("Cooldown started at t={now:.2}");
                }
            }
            AttackState::Cooldown => match (player - origin).try_normalize() {
                Some(direction) => {
                    self.projectiles.spawn_single(origin, direction, now)?;
                    report.events.push(BossEvent::AimedShotFired { direction });
                }
                None => log::debug!("Aimed shot skipped: boss is on the player"),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOSS_START;

    /// Far enough that the boss never reaches the player during a test
    const FAR: Vec3 = Vec3::new(1000.0, 0.0, 1000.0);

    fn controller() -> BossController {
        BossController::new(BossTuning::default()).unwrap()
    }

    fn controller_at(position: Vec3) -> BossController {
        BossController::new(BossTuning {
            start_position: position,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_starts_at_spawn() {
        let c = controller();
        assert_eq!(c.boss().position, Vec3::from_array(BOSS_START));
        assert_eq!(c.health().health(), 100);
        assert!(c.projectiles().is_empty());
    }

    #[test]
    fn test_chase_step() {
        let mut c = controller_at(Vec3::ZERO);
        let mut hits = 0;
        c.tick(Vec3::new(10.0, 0.0, 0.0), 0.25, || hits += 1).unwrap();

        assert!((c.boss().position - Vec3::new(0.05, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_invalid_player_position_leaves_state_untouched() {
        let mut c = controller_at(Vec3::ZERO);
        for bad in [
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(0.0, f32::INFINITY, 0.0),
            Vec3::new(0.0, 0.0, f32::NEG_INFINITY),
        ] {
            let err = c.tick(bad, 0.25, || {}).unwrap_err();
            assert!(matches!(err, SimError::InvalidInput { .. }));
        }
        assert_eq!(c.boss().position, Vec3::ZERO);
        assert_eq!(c.time(), 0.0);
        assert!(c.last_player().is_none());
    }

    #[test]
    fn test_invalid_dt() {
        let mut c = controller();
        for bad in [0.0, -1.0, f64::NAN] {
            let err = c.tick(FAR, bad, || {}).unwrap_err();
            assert!(matches!(err, SimError::InvalidArgument { .. }));
        }
        assert_eq!(c.time(), 0.0);
    }

    #[test]
    fn test_hit_only_within_contact_radius() {
        // Ends at distance 1.45
        let mut c = controller_at(Vec3::ZERO);
        let mut hits = 0;
        c.tick(Vec3::new(1.5, 0.0, 0.0), 0.25, || hits += 1).unwrap();
        assert_eq!(hits, 0);
        assert_eq!(c.boss().motion_state, MotionState::Chasing);

        // Ends at distance 0.95
        let mut c = controller_at(Vec3::ZERO);
        let report = c.tick(Vec3::new(1.0, 0.0, 0.0), 0.25, || hits += 1).unwrap();
        assert_eq!(hits, 1);
        assert_eq!(report.hits(), 1);
    }

    #[test]
    fn test_burst_cycle_and_cooldown() {
        let mut c = controller();
        let dt = 0.25;
        let mut bursts = Vec::new();
        let mut aimed = Vec::new();
        let mut cooldown_started = None;
        let mut cooldown_ended = None;

        while c.time() < 14.0 {
            let report = c.tick(FAR, dt, || {}).unwrap();
            for event in &report.events {
                match event {
                    BossEvent::BurstFired { count } => {
                        assert_eq!(*count, 60);
                        bursts.push(report.time);
                    }
                    BossEvent::AimedShotFired { .. } => aimed.push(report.time),
                    BossEvent::CooldownStarted => {
                        assert_eq!(c.boss().burst_count, 0);
                        assert_eq!(c.boss().attack_state, AttackState::Cooldown);
                        assert_eq!(c.projectiles().len(), 180);
                        cooldown_started = Some(report.time);
                    }
                    BossEvent::CooldownEnded => cooldown_ended = Some(report.time),
                    _ => {}
                }
            }
        }

        // Decisions need strictly more than 2s: 2.25, 4.5, 6.75
        assert_eq!(&bursts[..3], &[2.25, 4.5, 6.75]);
        assert_eq!(cooldown_started, Some(6.75));
        assert_eq!(aimed, vec![9.0, 11.25]);
        assert_eq!(cooldown_ended, Some(11.75));
        // Back to bursting for the next decision
        assert_eq!(bursts[3], 13.5);
        assert_eq!(c.boss().attack_state, AttackState::Bursting);
        assert_eq!(c.boss().burst_count, 1);
    }

    #[test]
    fn test_aimed_shot_points_at_player() {
        let mut c = controller_at(Vec3::ZERO);
        let player = Vec3::new(0.0, 0.0, 500.0);
        while c.boss().attack_state == AttackState::Bursting {
            c.tick(player, 0.25, || {}).unwrap();
        }
        let report = loop {
            let report = c.tick(player, 0.25, || {}).unwrap();
            if report
                .events
                .iter()
                .any(|e| matches!(e, BossEvent::AimedShotFired { .. }))
            {
                break report;
            }
        };
        let shot = c.projectiles().active().last().unwrap();
        assert!((shot.direction() - Vec3::Z).length() < 1e-5);
        assert_eq!(shot.spawn_time(), report.time);
    }

    #[test]
    fn test_pause_then_dash() {
        let mut c = controller_at(Vec3::ZERO);
        let player = Vec3::new(0.5, 0.0, 0.0);
        let dt = 0.25;
        let mut hits = 0;

        // Chase step lands in contact: hit, then pause in the same tick
        let report = c.tick(player, dt, || hits += 1).unwrap();
        assert_eq!(hits, 1);
        assert!(report.contains(&BossEvent::Paused));
        assert_eq!(c.boss().motion_state, MotionState::Paused);
        let frozen = c.boss().position;

        // Frozen for the next second of simulation time (deadline 1.25)
        for _ in 0..3 {
            let report = c.tick(player, dt, || hits += 1).unwrap();
            assert!(report.events.is_empty());
            assert_eq!(c.boss().position, frozen);
            assert!(c.boss().is_paused());
        }
        assert_eq!(hits, 1);

        // Player moved; the dash aims at where they are now
        let player = Vec3::new(0.05, 0.0, 3.0);
        let report = c.tick(player, dt, || hits += 1).unwrap();
        assert_eq!(c.time(), 1.25);
        let heading = (player - frozen).normalize();
        let expected = frozen + heading * 5.0;
        assert!((c.boss().position - expected).length() < 1e-5);
        assert!(((c.boss().position - frozen).length() - 5.0).abs() < 1e-5);
        assert!(report.events.iter().any(|e| matches!(e, BossEvent::Dashed { .. })));
        // Overshot by 2 units: no hit, back to chasing
        assert_eq!(hits, 1);
        assert_eq!(c.boss().motion_state, MotionState::Chasing);
        assert!(c.boss().dash_timer.is_none());
    }

    #[test]
    fn test_dash_landing_in_contact_hits_and_pauses_again() {
        let mut c = controller_at(Vec3::ZERO);
        let dt = 0.25;
        let mut hits = 0;
        c.tick(Vec3::new(0.5, 0.0, 0.0), dt, || hits += 1).unwrap();
        for _ in 0..3 {
            c.tick(Vec3::new(0.5, 0.0, 0.0), dt, || hits += 1).unwrap();
        }

        // Player now 5.2 away along +X: dash lands 0.2 short
        let frozen = c.boss().position;
        let player = frozen + Vec3::new(5.2, 0.0, 0.0);
        let report = c.tick(player, dt, || hits += 1).unwrap();
        assert_eq!(hits, 2);
        assert_eq!(report.hits(), 1);
        assert!(report.contains(&BossEvent::Paused));
        assert_eq!(c.boss().motion_state, MotionState::Paused);
    }

    #[test]
    fn test_attacks_suspended_while_paused() {
        let mut c = controller_at(Vec3::ZERO);
        let player = Vec3::new(0.5, 0.0, 0.0);
        // Pause lands just before the first attack decision would happen
        for _ in 0..8 {
            c.tick(FAR, 0.25, || {}).unwrap();
        }
        let start = c.boss().position;
        let player = start + player;
        let report = c.tick(player, 0.25, || {}).unwrap();
        assert!(report.contains(&BossEvent::Paused));
        assert!(!report.events.iter().any(|e| matches!(e, BossEvent::BurstFired { .. })));
        assert!(c.projectiles().is_empty());
    }

    #[test]
    fn test_single_pause_sequence_at_a_time() {
        let mut c = controller_at(Vec3::ZERO);
        let player = Vec3::new(0.5, 0.0, 0.0);
        for _ in 0..4 {
            c.tick(player, 0.25, || {}).unwrap();
            assert!(c.timers().len() <= 1);
        }
    }

    #[test]
    fn test_end_encounter_cancels_timers() {
        let mut c = controller_at(Vec3::ZERO);
        c.tick(Vec3::new(0.5, 0.0, 0.0), 0.25, || {}).unwrap();
        assert!(c.boss().dash_timer.is_some());
        assert_eq!(c.timers().len(), 1);

        c.end_encounter();
        assert!(c.timers().is_empty());
        assert!(c.boss().dash_timer.is_none());
        assert!(c.is_ended());

        let err = c.tick(Vec3::ZERO, 0.25, || {}).unwrap_err();
        assert!(matches!(err, SimError::EncounterEnded));

        // Idempotent
        c.end_encounter();
    }

    #[test]
    fn test_end_encounter_during_cooldown() {
        let mut c = controller();
        while c.boss().attack_state != AttackState::Cooldown {
            c.tick(FAR, 0.25, || {}).unwrap();
        }
        let handle = c.boss().cooldown_timer.expect("cooldown timer pending");
        assert_eq!(c.time(), 6.75);
        assert!(!c.projectiles().is_empty());

        c.end_encounter();
        assert!(c.boss().cooldown_timer.is_none());
        assert!(c.timers().is_empty());
        assert!(c.projectiles().is_empty());

        // Well past the 11.75 deadline: nothing fires and the state stays put
        for _ in 0..40 {
            let err = c.tick(FAR, 0.25, || {}).unwrap_err();
            assert!(matches!(err, SimError::EncounterEnded));
        }
        assert_eq!(c.boss().attack_state, AttackState::Cooldown);
        assert_eq!(c.time(), 6.75);

        // The cancelled handle no longer matches anything in the queue
        let mut timers = c.timers().clone();
        assert!(!timers.cancel(handle));
    }

    #[test]
    fn test_zero_health_is_reported_only() {
        let mut c = controller();
        c.apply_damage(150).unwrap();
        assert!(c.is_defeated());
        assert_eq!(c.health().health(), 0);

        // Boss keeps acting
        let before = c.boss().position;
        c.tick(FAR, 0.25, || {}).unwrap();
        assert_ne!(c.boss().position, before);

        assert!(matches!(
            c.apply_damage(-1),
            Err(SimError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_projectiles_expire_on_sim_clock() {
        let mut c = controller();
        let dt = 0.25;
        // Bursts at 2.25, 4.5 and 6.75
        while c.time() < 7.0 {
            c.tick(FAR, dt, || {}).unwrap();
        }
        assert_eq!(c.projectiles().len(), 180);
        while c.time() < 7.5 {
            c.tick(FAR, dt, || {}).unwrap();
        }
        // The 2.25 burst is older than 5s now
        assert_eq!(c.projectiles().len(), 120);
    }

    #[test]
    fn test_determinism() {
        let script = |c: &mut BossController| {
            let mut hits = 0;
            for i in 0..400 {
                let t = i as f32 * 0.05;
                let player = Vec3::new(6.0 * t.cos(), 0.0, 6.0 * t.sin());
                c.tick(player, 1.0 / 60.0, || hits += 1).unwrap();
            }
            hits
        };

        let mut a = controller();
        let mut b = controller();
        assert_eq!(script(&mut a), script(&mut b));
        assert_eq!(a.boss().position, b.boss().position);
        assert_eq!(a.projectiles().len(), b.projectiles().len());
        assert_eq!(a.time(), b.time());
    }
}
