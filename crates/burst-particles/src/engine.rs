//! The simulation engine: spawns particles on impulses, advances them on
//! ticks and retires them once they settle.

use crate::diff::{increases, ReactionMap};
use crate::particle::{Particle, Payload, PayloadKey};
use crate::preset::{EffectConfig, Trigger};
use crate::spring::is_settled;
use burst_core::{ParticleId, Transform2D};
use burst_runtime::FrameSystem;

/// A discrete trigger from the host: monitored state changed to `token`
#[derive(Debug, Clone, PartialEq)]
pub struct Impulse {
    /// New state value (e.g. the counter after incrementing)
    pub token: i64,
    /// Explicit content; `None` cycles through the palette by token
    pub payload: Option<PayloadKey>,
    /// Launch velocity; `None` uses the configured initial velocity
    pub velocity: Option<f32>,
}

impl Impulse {
    pub fn new(token: i64) -> Self {
        Self {
            token,
            payload: None,
            velocity: None,
        }
    }

    pub fn with_payload(mut self, key: PayloadKey) -> Self {
        self.payload = Some(key);
        self
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

/// Owns the live particle set of one effect instance.
///
/// Particles are kept in spawn order. Spawning never disturbs particles in
/// flight, and an empty set is the only idle signal.
pub struct Engine {
    config: EffectConfig,
    particles: Vec<Particle>,
    /// Last token seen, for `Trigger::OnIncrease`
    last_token: Option<i64>,
    /// Snapshot for `observe_mapping`
    last_mapping: ReactionMap,
    /// Next sequential identity, or `None` for random identities
    next_id: Option<u128>,
}

impl Engine {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
            last_token: None,
            last_mapping: ReactionMap::new(),
            next_id: None,
        }
    }

    /// Hand out identities `start, start + 1, ...` instead of random ones,
    /// making whole runs reproducible.
    pub fn with_sequential_ids(mut self, start: u128) -> Self {
        self.next_id = Some(start);
        self
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Live particles in spawn order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
    }

    /// Reaction map as of the last `observe_mapping`/`on_mapping_changed`
    pub fn last_mapping(&self) -> &ReactionMap {
        &self.last_mapping
    }

    /// Payload key and transform of each live particle, as of the last tick
    pub fn current_particles(&self) -> impl Iterator<Item = (&PayloadKey, &Transform2D)> + '_ {
        self.particles.iter().map(|p| (p.key(), p.transform()))
    }

    /// Handle a host impulse, spawning at most one particle
    pub fn on_impulse(&mut self, impulse: &Impulse) -> Option<ParticleId> {
        if self.config.trigger == Trigger::OnIncrease {
            let previous = self.last_token.replace(impulse.token);
            if previous.is_some_and(|last| impulse.token <= last) {
                return None;
            }
        }

        let key = impulse
            .payload
            .clone()
            .unwrap_or_else(|| PayloadKey::symbol(self.config.palette.index_for_token(impulse.token)));
        let velocity = if self.config.force_initial_velocity {
            self.config.initial_velocity
        } else {
            impulse.velocity.unwrap_or(self.config.initial_velocity)
        };

        self.spawn(Payload::new(key, impulse.token), velocity)
    }

    /// Spawn one particle at progress 0.
    ///
    /// Returns `None` only when `max_particles` is reached.
    pub fn spawn(&mut self, payload: Payload, velocity: f32) -> Option<ParticleId> {
        let cap = self.config.max_particles;
        if cap > 0 && self.particles.len() >= cap {
            log::debug!(
                "[{}] particle cap {} reached, dropping {}",
                self.config.name,
                cap,
                payload.key
            );
            return None;
        }

        let id = self.next_id();
        let mut particle = Particle::new(id, payload, velocity);
        particle.transform =
            self.config
                .trajectory
                .transform(id, particle.progress, particle.launch_velocity());
        log::trace!("[{}] spawn {} ({})", self.config.name, id, particle.key());
        self.particles.push(particle);
        Some(id)
    }

    /// Spawn one particle per `(entity, reaction)` whose count rose from
    /// `old` to `new`, then remember `new` as the current snapshot.
    pub fn on_mapping_changed(&mut self, old: &ReactionMap, new: &ReactionMap) -> Vec<ParticleId> {
        let spawned = self.spawn_increases(old, new);
        self.last_mapping = new.clone();
        spawned
    }

    /// Diff `new` against the stored snapshot, spawn for every increase and
    /// replace the snapshot (whether or not anything spawned).
    pub fn observe_mapping(&mut self, new: ReactionMap) -> Vec<ParticleId> {
        let old = std::mem::take(&mut self.last_mapping);
        let spawned = self.spawn_increases(&old, &new);
        self.last_mapping = new;
        spawned
    }

    /// Advance every particle by `dt` seconds (clamped to `max_delta`) and
    /// retire the settled ones. `dt <= 0` changes nothing.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt as f32;
        if !(dt > 0.0) {
            return;
        }
        let dt = dt.min(self.config.max_delta);

        let spring = self.config.spring;
        let target = self.config.target;
        let threshold = self.config.settle_threshold;

        // Reverse order keeps indices valid across removals
        for i in (0..self.particles.len()).rev() {
            let p = &mut self.particles[i];
            let (progress, velocity) = spring.advance(p.progress, target, p.velocity, dt);
            p.progress = progress;
            p.velocity = velocity;

            if is_settled(progress, velocity, target, threshold) {
                let retired = self.particles.remove(i);
                log::trace!("[{}] retire {}", self.config.name, retired.id());
            } else {
                p.transform = self
                    .config
                    .trajectory
                    .transform(p.id(), progress, p.launch_velocity());
            }
        }
    }

    /// Drop every live particle at once. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.particles.len();
        self.particles.clear();
        if count > 0 {
            log::debug!("[{}] cleared {} particle(s)", self.config.name, count);
        }
        count
    }

    fn spawn_increases(&mut self, old: &ReactionMap, new: &ReactionMap) -> Vec<ParticleId> {
        let velocity = self.config.initial_velocity;
        increases(old, new)
            .into_iter()
            .filter_map(|(entity, reaction)| {
                let token = new
                    .get(&entity)
                    .and_then(|r| r.get(&reaction))
                    .map_or(0, |&count| i64::from(count));
                self.spawn(
                    Payload::new(PayloadKey::reaction(entity, reaction), token),
                    velocity,
                )
            })
            .collect()
    }

    fn next_id(&mut self) -> ParticleId {
        match &mut self.next_id {
            Some(next) => {
                let id = ParticleId::from_raw(*next);
                *next = next.wrapping_add(1);
                id
            }
            None => ParticleId::random(),
        }
    }
}

impl FrameSystem for Engine {
    fn tick(&mut self, dt: f64) {
        Engine::tick(self, dt);
    }

    fn is_idle(&self) -> bool {
        Engine::is_idle(self)
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use burst_runtime::FrameScheduler;

    const DT: f64 = 1.0 / 60.0;

    fn engine(preset: &str) -> Engine {
        Engine::new(EffectConfig::preset(preset).unwrap()).with_sequential_ids(1)
    }

    fn run_until_idle(engine: &mut Engine, max_ticks: usize) -> Option<usize> {
        for n in 1..=max_ticks {
            engine.tick(DT);
            if engine.is_idle() {
                return Some(n);
            }
        }
        None
    }

    #[test]
    fn idle_active_idle() {
        let mut engine = engine("rise");
        assert!(engine.is_idle());

        engine.on_impulse(&Impulse::new(1)).unwrap();
        assert!(!engine.is_idle());

        let ticks = run_until_idle(&mut engine, 300).expect("particle should retire");
        assert!(ticks > 10);
    }

    #[test]
    fn second_impulse_leaves_first_untouched() {
        let mut engine = engine("rise");
        let first = engine.on_impulse(&Impulse::new(1)).unwrap();
        for _ in 0..10 {
            engine.tick(DT);
        }
        let before = engine.particles()[0].clone();

        let second = engine.on_impulse(&Impulse::new(2)).unwrap();
        assert_ne!(first, second);
        assert_eq!(engine.len(), 2);

        let after = &engine.particles()[0];
        assert_eq!(after.id(), first);
        assert_eq!(after.payload(), before.payload());
        assert_eq!(after.progress(), before.progress());
        assert_eq!(after.velocity(), before.velocity());
        assert_eq!(engine.particles()[1].progress(), 0.0);
    }

    #[test]
    fn stalled_tick_is_clamped() {
        let mut a = engine("rise");
        let mut b = engine("rise");
        a.on_impulse(&Impulse::new(1));
        b.on_impulse(&Impulse::new(1));

        a.tick(5.0);
        b.tick(b.config().max_delta as f64);
        assert_eq!(a.particles()[0].progress(), b.particles()[0].progress());
        assert_eq!(a.particles()[0].velocity(), b.particles()[0].velocity());
        assert_eq!(a.particles()[0].transform(), b.particles()[0].transform());
    }

    #[test]
    fn zero_and_negative_ticks_are_no_ops() {
        let mut engine = engine("rise");
        engine.on_impulse(&Impulse::new(1));
        engine.tick(0.0);
        engine.tick(-1.0);
        engine.tick(f64::NAN);
        assert_eq!(engine.particles()[0].progress(), 0.0);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn tokens_cycle_palette() {
        let mut config = EffectConfig::preset("rise").unwrap();
        config.palette = Palette::from_names(["a", "b", "c", "d"]);
        let mut engine = Engine::new(config);
        for token in 1..=5 {
            engine.on_impulse(&Impulse::new(token));
        }
        let indices: Vec<usize> = engine
            .particles()
            .iter()
            .filter_map(|p| p.key().symbol_index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn explicit_payload_wins() {
        let mut engine = engine("rise");
        let key = PayloadKey::reaction("post", "fire");
        engine.on_impulse(&Impulse::new(1).with_payload(key.clone()));
        assert_eq!(engine.particles()[0].key(), &key);
    }

    #[test]
    fn impulse_velocity_respects_preset() {
        let mut rise = engine("rise");
        rise.on_impulse(&Impulse::new(1).with_velocity(2.0));
        assert_eq!(rise.particles()[0].velocity(), 2.0);

        let mut still = engine("rise_still");
        still.on_impulse(&Impulse::new(1).with_velocity(2.0));
        assert_eq!(still.particles()[0].velocity(), 0.0);
    }

    #[test]
    fn on_increase_skips_repeats_and_decreases() {
        let mut engine = engine("counter");
        assert!(engine.on_impulse(&Impulse::new(3)).is_some());
        assert!(engine.on_impulse(&Impulse::new(3)).is_none());
        assert!(engine.on_impulse(&Impulse::new(2)).is_none());
        assert!(engine.on_impulse(&Impulse::new(3)).is_some());
        assert_eq!(engine.len(), 2);
    }

    fn map(entries: &[(&str, &str, u32)]) -> ReactionMap {
        let mut m = ReactionMap::new();
        for (entity, reaction, count) in entries {
            m.entry(entity.to_string())
                .or_default()
                .insert(reaction.to_string(), *count);
        }
        m
    }

    #[test]
    fn mapping_diff_spawns_per_increase() {
        let mut engine = engine("reactions");
        let old = map(&[("p1", "like", 2)]);
        let new = map(&[("p1", "like", 3), ("p2", "star", 1)]);

        let spawned = engine.on_mapping_changed(&old, &new);
        assert_eq!(spawned.len(), 2);
        let keys: Vec<&PayloadKey> = engine.particles().iter().map(|p| p.key()).collect();
        assert_eq!(
            keys,
            vec![
                &PayloadKey::reaction("p1", "like"),
                &PayloadKey::reaction("p2", "star")
            ]
        );
        assert_eq!(engine.particles()[0].payload().token, 3);
        assert_eq!(engine.last_mapping(), &new);

        assert!(engine
            .on_mapping_changed(&old, &map(&[("p1", "like", 2)]))
            .is_empty());
        assert!(engine
            .on_mapping_changed(&old, &map(&[("p1", "like", 1)]))
            .is_empty());
    }

    #[test]
    fn observe_mapping_replaces_snapshot() {
        let mut engine = engine("reactions");
        assert_eq!(engine.observe_mapping(map(&[("p1", "like", 1)])).len(), 1);
        // Decrease: no spawn, but the snapshot still moves
        assert!(engine.observe_mapping(map(&[("p1", "like", 0)])).is_empty());
        assert_eq!(engine.last_mapping(), &map(&[("p1", "like", 0)]));
        assert_eq!(engine.observe_mapping(map(&[("p1", "like", 1)])).len(), 1);
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn particle_cap_refuses_spawns() {
        let mut config = EffectConfig::preset("rise").unwrap();
        config.max_particles = 2;
        let mut engine = Engine::new(config);
        assert!(engine.on_impulse(&Impulse::new(1)).is_some());
        assert!(engine.on_impulse(&Impulse::new(2)).is_some());
        assert!(engine.on_impulse(&Impulse::new(3)).is_none());
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut engine = engine("rise");
        engine.on_impulse(&Impulse::new(1));
        engine.on_impulse(&Impulse::new(2));
        assert_eq!(engine.clear(), 2);
        assert!(engine.is_idle());
        assert_eq!(engine.clear(), 0);
    }

    #[test]
    fn snap_spring_retires_on_first_tick() {
        let mut config = EffectConfig::preset("rise").unwrap();
        config.spring.stiffness = 0.0;
        let mut engine = Engine::new(config);
        engine.on_impulse(&Impulse::new(1));
        engine.tick(DT);
        assert!(engine.is_idle());
    }

    #[test]
    fn current_particles_reflect_last_tick() {
        let mut engine = engine("rise");
        engine.on_impulse(&Impulse::new(1));
        engine.tick(DT);
        let (key, transform) = engine.current_particles().next().unwrap();
        assert_eq!(key, &PayloadKey::symbol(0));
        let p = &engine.particles()[0];
        let expected = engine
            .config()
            .trajectory
            .transform(p.id(), p.progress(), p.launch_velocity());
        assert_eq!(transform, &expected);
    }

    #[test]
    fn scheduler_drives_engine_to_idle() {
        let mut sched = FrameScheduler::new(engine("rise"));
        assert!(!sched.is_active());
        sched.deliver(|e| e.on_impulse(&Impulse::new(1)));
        assert!(sched.is_active());

        let mut frames = 0;
        let mut t = 0.0;
        while sched.on_frame(t) {
            t += DT;
            frames += 1;
            assert!(frames < 400, "engine never went idle");
        }
        assert!(sched.system().is_idle());
    }

    #[test]
    fn spawn_through_system_mut_still_retires() {
        let mut sched = FrameScheduler::new(engine("rise"));
        sched.system_mut().on_impulse(&Impulse::new(1));
        assert_eq!(sched.system().len(), 1);

        let mut t = 0.0;
        for _ in 0..400 {
            sched.on_frame(t);
            t += DT;
        }
        assert!(!sched.is_active());
        assert!(sched.system().is_idle());
    }
}
