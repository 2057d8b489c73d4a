//! The particle system: a bounded pool driven by a frozen config tree.
//!
//! [`ParticleSystem::step`] runs the three per-frame passes in order:
//!
//! 1. **Spawn**: every live particle with emitter slots spawns toward its
//!    configs' target rates (see below).
//! 2. **Update**: integrate kinematics, age everything, swap-remove the
//!    expired.
//! 3. **Render**: a pure read pass issuing one tinted draw per particle.
//!
//! # The catch-up rate controller
//!
//! A slot's observed rate is `emit_count / particle_age`, averaged over
//! the emitting particle's whole lifetime so far rather than over the
//! last frame.
//! Each frame the slot spawns until that average reaches the config's
//! `spawn_frequency`. After a slow frame the next frame emits a volley
//! until the average catches up, so the long-run emission rate converges
//! on `spawn_frequency` regardless of frame-time jitter. Burst emitters
//! gate the same controller behind an anchored schedule: the next burst is
//! pinned to `last_burst + interval`, not to when the frame happened to
//! land, so bursts never drift.
//!
//! # Backpressure
//!
//! The pool has a fixed capacity. Spawning past it silently drops the new
//! particle: the effect degrades to fewer particles instead of failing or
//! reallocating mid-frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emitter::{ConfigArena, ConfigId, EmitAmount, EmitKind, EmitterConfig};
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::render::{Rect, Sprite, Surface};

/// Default particle pool capacity.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// A fixed-capacity particle pool plus the frozen emitter config tree.
pub struct ParticleSystem {
    arena: ConfigArena,
    pool: Vec<Particle>,
    capacity: usize,
    rng: StdRng,
}

impl ParticleSystem {
    /// Validate `root` and build a system seeded with one synthetic
    /// particle at the origin: ageless in effect (it never expires), no
    /// visual form, one emitter slot bound to the root config.
    pub fn new(root: EmitterConfig) -> Result<Self, ConfigError> {
        let arena = ConfigArena::build(&root)?;
        let mut pool = Vec::with_capacity(DEFAULT_CAPACITY);
        let mut seed = Particle::new(Vec2::ZERO, Vec2::ZERO, None);
        seed.push_slot(arena.root());
        pool.push(seed);
        Ok(Self {
            arena,
            pool,
            capacity: DEFAULT_CAPACITY,
            rng: StdRng::from_entropy(),
        })
    }

    /// Set the pool capacity (minimum 1, the seed always fits). The pool
    /// is reserved up front so no reallocation happens during a frame.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self.pool.truncate(self.capacity);
        let additional = self.capacity.saturating_sub(self.pool.len());
        self.pool.reserve_exact(additional);
        self
    }

    /// Reseed the random source for deterministic replay.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Move the synthetic seed particle, i.e. the effect's origin.
    pub fn with_origin(mut self, position: Vec2) -> Self {
        self.pool[0].position = position;
        self
    }

    /// Number of live particles, seed included.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// The pool capacity ceiling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read-only view of the live pool. Ordering is arbitrary: removal
    /// swaps the last particle into the vacated index.
    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    /// Id of the root config.
    pub fn root_config(&self) -> ConfigId {
        self.arena.root()
    }

    /// Parameters of a config node (its `sub_emissions` list is empty in
    /// this flattened view; see [`sub_configs`](Self::sub_configs)).
    pub fn config(&self, id: ConfigId) -> &EmitterConfig {
        &self.arena.node(id).params
    }

    /// Ids of a config node's sub-emissions.
    pub fn sub_configs(&self, id: ConfigId) -> &[ConfigId] {
        &self.arena.node(id).children
    }

    /// Per-frame entry point: spawn, update, render.
    ///
    /// `dt` is the frame's elapsed seconds. Zero, negative, or non-finite
    /// values are a caller error; the simulation pass is skipped rather
    /// than letting them corrupt age or velocity state. Rendering still
    /// happens, so a paused host keeps its picture.
    pub fn step<S: Surface>(&mut self, surface: &mut S, sprite: &mut S::Sprite, dt: f32) {
        self.advance(dt);
        self.render(surface, sprite);
    }

    /// Spawn and update without rendering. Useful headless: tests and
    /// paused hosts drive the simulation through this.
    pub fn advance(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.spawn_particles();
        self.update_particles(dt);
    }

    fn spawn_particles(&mut self) {
        let Self {
            ref arena,
            ref mut pool,
            ref mut rng,
            capacity,
        } = *self;

        // Particles appended mid-pass are visited too, but their age is
        // zero so they cannot emit the frame they are born. That guard is
        // what keeps the recursion from unrolling within a single frame.
        let mut i = 0;
        while i < pool.len() {
            let emitter = pool[i];
            if emitter.age <= 0.0 || emitter.slot_count() == 0 {
                i += 1;
                continue;
            }

            for j in 0..emitter.slot_count() {
                let mut slot = emitter.slots()[j];
                let node = arena.node(slot.config);
                let params = &node.params;

                if params.kind == EmitKind::None {
                    continue;
                }

                if params.kind == EmitKind::Burst {
                    let elapsed = slot.last_burst_time + params.burst_interval - emitter.age;
                    if elapsed >= 0.0 {
                        continue;
                    }
                    // Anchor the next burst to the ideal schedule rather
                    // than to observed time, avoiding drift.
                    slot.last_burst_time = emitter.age + elapsed;
                    pool[i].slots_mut()[j].last_burst_time = slot.last_burst_time;
                }

                // None-kind children never become slot targets.
                let heirs: Vec<ConfigId> = node
                    .children
                    .iter()
                    .copied()
                    .filter(|&c| arena.node(c).params.kind != EmitKind::None)
                    .collect();

                let mut rate = slot.emit_count as f32 / emitter.age;
                while rate < params.spawn_frequency {
                    let t: f32 = rng.gen();
                    let angle = params.start_angle + t * (params.end_angle - params.start_angle);
                    let velocity = Vec2::new(angle.sin(), angle.cos());
                    let mut child = Particle::new(emitter.position, velocity, Some(slot.config));

                    match params.amount {
                        EmitAmount::All => {
                            for &heir in &heirs {
                                child.push_slot(heir);
                            }
                        }
                        EmitAmount::Single => {
                            if !heirs.is_empty() {
                                child.push_slot(heirs[rng.gen_range(0..heirs.len())]);
                            }
                        }
                    }

                    if pool.len() < capacity {
                        pool.push(child);
                    }
                    // The count advances even when the pool is saturated;
                    // backpressure must not stall the rate controller.
                    slot.emit_count += 1;
                    rate = slot.emit_count as f32 / emitter.age;
                }

                pool[i].slots_mut()[j].emit_count = slot.emit_count;
            }

            i += 1;
        }
    }

    fn update_particles(&mut self, dt: f32) {
        let Self {
            ref arena,
            ref mut pool,
            ..
        } = *self;

        let mut i = 0;
        while i < pool.len() {
            let particle = &mut pool[i];
            particle.age += dt;

            let Some(id) = particle.config else {
                // The seed ages but never moves or expires.
                i += 1;
                continue;
            };
            let params = &arena.node(id).params;

            particle.velocity.y += params.gravity_force * dt;
            particle.position += particle.velocity * dt * params.particle_speed;

            if particle.age > params.max_lifetime {
                // Swap-remove and revisit this index: the particle swapped
                // in from the back still needs evaluating this pass.
                pool.swap_remove(i);
                continue;
            }
            i += 1;
        }
    }

    /// Pure read pass: one tinted draw per particle, tint reset to neutral
    /// after each. Mutates no simulation state.
    pub fn render<S: Surface>(&self, surface: &mut S, sprite: &mut S::Sprite) {
        for particle in &self.pool {
            let Some(id) = particle.config else { continue };
            let params = &self.arena.node(id).params;

            let color = params.gradient.sample(particle.age / params.max_lifetime);
            sprite.set_color_mod(color.r, color.g, color.b);
            sprite.set_alpha_mod(color.a);
            surface.blit(
                sprite,
                Rect::centered(particle.position.x, particle.position.y, params.particle_size),
            );
            sprite.set_color_mod(255, 255, 255);
            sprite.set_alpha_mod(255);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{Gradient, Rgba};

    const DT: f32 = 1.0 / 60.0;

    fn leaf(frequency: f32) -> EmitterConfig {
        EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 0, 0, 0)))
            .frequency(frequency)
    }

    fn run(system: &mut ParticleSystem, frames: usize) {
        for _ in 0..frames {
            system.advance(DT);
        }
    }

    #[test]
    fn test_seed_particle() {
        let system = ParticleSystem::new(leaf(1.0)).unwrap();
        assert_eq!(system.len(), 1);
        let seed = &system.particles()[0];
        assert!(seed.config.is_none());
        assert_eq!(seed.slot_count(), 1);
        assert_eq!(seed.slots()[0].config, system.root_config());
    }

    #[test]
    fn test_seed_ages_but_never_moves_or_expires() {
        let mut system = ParticleSystem::new(leaf(0.0)).unwrap();
        run(&mut system, 600);
        let seed = &system.particles()[0];
        assert!(seed.config.is_none());
        assert!((seed.age - 10.0).abs() < 1e-3);
        assert_eq!(seed.position, Vec2::ZERO);
    }

    #[test]
    fn test_no_emission_on_birth_frame() {
        let mut system = ParticleSystem::new(leaf(1000.0)).unwrap().with_seed(7);
        // Frame 1: the seed's age is still zero, nothing may spawn.
        system.advance(DT);
        assert_eq!(system.len(), 1);
        // Frame 2: the seed has aged, the volley arrives.
        system.advance(DT);
        assert!(system.len() > 1);
    }

    #[test]
    fn test_none_kind_slot_never_spawns() {
        let root = leaf(100.0).kind(EmitKind::None);
        let mut system = ParticleSystem::new(root).unwrap().with_seed(7);
        run(&mut system, 120);
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_none_kind_children_are_not_slot_targets() {
        let root = leaf(50.0)
            .sub_emission(leaf(10.0).kind(EmitKind::None))
            .sub_emission(leaf(10.0));
        let mut system = ParticleSystem::new(root).unwrap().with_seed(7);
        run(&mut system, 10);

        let live_child = system.sub_configs(system.root_config())[1];
        for particle in system.particles() {
            if particle.config == Some(system.root_config()) {
                assert_eq!(particle.slot_count(), 1);
                assert_eq!(particle.slots()[0].config, live_child);
            }
        }
    }

    #[test]
    fn test_saturated_pool_still_advances_emit_count() {
        let mut system = ParticleSystem::new(leaf(600.0))
            .unwrap()
            .with_seed(7)
            .with_capacity(4);
        run(&mut system, 60);
        assert!(system.len() <= 4);
        let seed = &system.particles()[0];
        // The controller kept counting even though pushes were dropped.
        assert!(seed.slots()[0].emit_count > 100);
    }

    #[test]
    fn test_negative_dt_is_treated_as_zero() {
        let mut system = ParticleSystem::new(leaf(10.0)).unwrap().with_seed(7);
        run(&mut system, 30);
        let before: Vec<f32> = system.particles().iter().map(|p| p.age).collect();
        system.advance(-1.0);
        let after: Vec<f32> = system.particles().iter().map(|p| p.age).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_expired_particles_are_all_removed_in_one_pass() {
        // Short-lived particles spawned in one volley all expire together;
        // the swap-and-revisit removal must not skip the swapped-in ones.
        let root = leaf(200.0).lifetime(0.1);
        let mut system = ParticleSystem::new(root).unwrap().with_seed(7);
        run(&mut system, 2);
        assert!(system.len() > 1);
        // Age everything past the lifetime in one jump.
        system.update_particles(1.0);
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_spawned_velocity_is_unit_direction() {
        let mut system = ParticleSystem::new(leaf(50.0).speed(0.0)).unwrap().with_seed(7);
        run(&mut system, 3);
        for particle in system.particles().iter().filter(|p| p.config.is_some()) {
            assert!((particle.velocity.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_angle_range_is_respected() {
        use std::f32::consts::FRAC_PI_2;
        // Angles in [-pi/2, pi/2] give velocity x = sin(a) in [-1, 1] and
        // y = cos(a) in [0, 1]: everything points "down" in cos terms.
        let root = leaf(100.0).angle_range(-FRAC_PI_2, FRAC_PI_2).speed(0.0);
        let mut system = ParticleSystem::new(root).unwrap().with_seed(7);
        run(&mut system, 60);
        let mut seen = 0;
        for particle in system.particles().iter().filter(|p| p.config.is_some()) {
            assert!(particle.velocity.y >= -1e-6);
            seen += 1;
        }
        assert!(seen > 50);
    }

    #[test]
    fn test_gravity_accumulates_on_velocity() {
        let root = leaf(10.0).gravity(2.0).speed(1.0).lifetime(10.0);
        let mut system = ParticleSystem::new(root).unwrap().with_seed(7);
        run(&mut system, 60);
        // Spawned particles' vy grows by 2 * age on top of an initial
        // cos(angle) component in [-1, 1].
        let particle = system
            .particles()
            .iter()
            .find(|p| p.config.is_some())
            .unwrap();
        let expected = particle.age * 2.0;
        assert!(particle.velocity.y >= expected - 1.0 - 1e-3);
    }
}
