//! Emitter config trees.
//!
//! An [`EmitterConfig`] is an immutable template describing how an emitter
//! spawns particles: angular range, speed, lifetime, gravity, a
//! color-over-age [`Gradient`], and an ordered list of *sub-emissions*:
//! configs that particles spawned by this one will themselves emit from.
//! Nesting sub-emissions is what turns a single seed particle into a
//! recursive effect like a firework: shell, then sparks, then embers.
//!
//! Configs are built with chained setters and handed to
//! [`ParticleSystem::new`](crate::ParticleSystem::new), which validates the
//! whole tree up front and freezes it for the lifetime of the system.
//!
//! # Example
//!
//! ```ignore
//! let sparks = EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 0, 0, 0)))
//!     .kind(EmitKind::Burst)
//!     .burst_interval(0.49)
//!     .frequency(40.0)
//!     .angle_range(0.0, std::f32::consts::TAU);
//!
//! let shell = EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 255, 225, 0)))
//!     .frequency(1.0)
//!     .speed(280.0)
//!     .gravity(0.581)
//!     .sub_emission(sparks);
//! ```

use std::fmt;

use crate::error::ConfigError;
use crate::gradient::Gradient;
use crate::particle::MAX_EMITTER_SLOTS;

/// How an emitter schedules spawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmitKind {
    /// Spawn in bursts, one catch-up volley every `burst_interval` seconds.
    Burst,
    /// Spawn continuously toward the target `spawn_frequency`.
    #[default]
    Continuous,
    /// Never emits. A sentinel meaning "no sub-emission": configs of this
    /// kind are filtered out when populating a particle's emitter slots.
    None,
}

/// How a spawned particle inherits the parent config's sub-emissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmitAmount {
    /// One emitter slot per sub-emission (simultaneous branching).
    #[default]
    All,
    /// Exactly one slot, bound to a uniformly random sub-emission.
    Single,
}

/// Immutable template for one emitter in the effect tree.
///
/// All fields are public for inspection; treat a config as frozen once a
/// [`ParticleSystem`](crate::ParticleSystem) has been built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitterConfig {
    /// Start of the angular emission range, radians. The range may wrap or
    /// invert to bias direction.
    pub start_angle: f32,
    /// End of the angular emission range, radians.
    pub end_angle: f32,
    /// Particle lifetime in seconds. Must be positive.
    pub max_lifetime: f32,
    /// Target emission rate in particles per second.
    pub spawn_frequency: f32,
    /// Seconds between bursts. Only meaningful for [`EmitKind::Burst`].
    pub burst_interval: f32,
    /// Rendered sprite size in pixels.
    pub particle_size: f32,
    /// Scalar speed multiplier applied to the unit velocity at integration.
    pub particle_speed: f32,
    /// Acceleration along the velocity's down axis, per second.
    pub gravity_force: f32,
    /// Color ramp over normalized age.
    pub gradient: Gradient,
    /// Spawn scheduling.
    pub kind: EmitKind,
    /// Slot inheritance for spawned particles.
    pub amount: EmitAmount,
    /// Configs that particles spawned by this one will emit from.
    pub sub_emissions: Vec<EmitterConfig>,
}

impl EmitterConfig {
    /// A continuous emitter with the given gradient and neutral defaults:
    /// full-circle angles, 1 second lifetime, no gravity, no sub-emissions.
    pub fn new(gradient: Gradient) -> Self {
        Self {
            start_angle: 0.0,
            end_angle: std::f32::consts::TAU,
            max_lifetime: 1.0,
            spawn_frequency: 0.0,
            burst_interval: 0.0,
            particle_size: 4.0,
            particle_speed: 1.0,
            gravity_force: 0.0,
            gradient,
            kind: EmitKind::Continuous,
            amount: EmitAmount::All,
            sub_emissions: Vec::new(),
        }
    }

    /// Set the angular emission range in radians.
    pub fn angle_range(mut self, start: f32, end: f32) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    /// Set the particle lifetime in seconds.
    pub fn lifetime(mut self, seconds: f32) -> Self {
        self.max_lifetime = seconds;
        self
    }

    /// Set the target emission rate in particles per second.
    pub fn frequency(mut self, per_second: f32) -> Self {
        self.spawn_frequency = per_second;
        self
    }

    /// Set the delay between bursts, seconds.
    pub fn burst_interval(mut self, seconds: f32) -> Self {
        self.burst_interval = seconds;
        self
    }

    /// Set the rendered sprite size in pixels.
    pub fn size(mut self, pixels: f32) -> Self {
        self.particle_size = pixels;
        self
    }

    /// Set the speed multiplier.
    pub fn speed(mut self, speed: f32) -> Self {
        self.particle_speed = speed;
        self
    }

    /// Set the gravity acceleration.
    pub fn gravity(mut self, force: f32) -> Self {
        self.gravity_force = force;
        self
    }

    /// Set the spawn scheduling kind.
    pub fn kind(mut self, kind: EmitKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the slot inheritance mode.
    pub fn amount(mut self, amount: EmitAmount) -> Self {
        self.amount = amount;
        self
    }

    /// Append a sub-emission config.
    pub fn sub_emission(mut self, child: EmitterConfig) -> Self {
        self.sub_emissions.push(child);
        self
    }

    /// Validate this config and its whole subtree.
    ///
    /// The gradient invariants are enforced by [`Gradient::new`] already;
    /// this checks the scalar fields and the slot bound. Cycles cannot be
    /// expressed: sub-emissions are owned values, so the tree shape is
    /// guaranteed structurally.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("start_angle", self.start_angle),
            ("end_angle", self.end_angle),
            ("max_lifetime", self.max_lifetime),
            ("spawn_frequency", self.spawn_frequency),
            ("burst_interval", self.burst_interval),
            ("particle_size", self.particle_size),
            ("particle_speed", self.particle_speed),
            ("gravity_force", self.gravity_force),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter(field, value));
            }
        }
        if !(self.max_lifetime > 0.0) {
            return Err(ConfigError::NonPositiveLifetime(self.max_lifetime));
        }
        if !(self.spawn_frequency >= 0.0) {
            return Err(ConfigError::NegativeSpawnFrequency(self.spawn_frequency));
        }
        if !(self.burst_interval >= 0.0) {
            return Err(ConfigError::NegativeBurstInterval(self.burst_interval));
        }
        if self.sub_emissions.len() > MAX_EMITTER_SLOTS {
            return Err(ConfigError::TooManySubEmissions(self.sub_emissions.len()));
        }
        for child in &self.sub_emissions {
            child.validate()?;
        }
        Ok(())
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        writeln!(f, "{pad}max_lifetime: {}", self.max_lifetime)?;
        writeln!(f, "{pad}spawn_frequency: {}", self.spawn_frequency)?;
        writeln!(f, "{pad}burst_interval: {}", self.burst_interval)?;
        writeln!(f, "{pad}start_angle: {}", self.start_angle)?;
        writeln!(f, "{pad}end_angle: {}", self.end_angle)?;
        writeln!(f, "{pad}particle_size: {}", self.particle_size)?;
        writeln!(f, "{pad}particle_speed: {}", self.particle_speed)?;
        writeln!(f, "{pad}gravity_force: {}", self.gravity_force)?;
        writeln!(f, "{pad}kind: {:?}", self.kind)?;
        writeln!(f, "{pad}amount: {:?}", self.amount)?;
        writeln!(f, "{pad}color_stops: {}", self.gradient.stops().len())?;
        for (i, stop) in self.gradient.stops().iter().enumerate() {
            let c = stop.color;
            writeln!(
                f,
                "{pad}  [{i}] ratio: {} r: {} g: {} b: {} a: {}",
                stop.ratio, c.r, c.g, c.b, c.a
            )?;
        }
        writeln!(f, "{pad}sub_emissions: {}", self.sub_emissions.len())?;
        for (i, child) in self.sub_emissions.iter().enumerate() {
            writeln!(f, "{pad}  child {i}:")?;
            child.fmt_indented(f, depth + 2)?;
        }
        Ok(())
    }
}

/// Human-readable recursive dump of the whole config tree.
///
/// A debugging aid only: the format carries no compatibility guarantees.
impl fmt::Display for EmitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Index of a config node inside a system's flattened arena.
pub type ConfigId = usize;

/// One node of a flattened config tree: the config's own parameters with
/// `sub_emissions` replaced by arena indices.
#[derive(Clone, Debug)]
pub(crate) struct ConfigNode {
    /// Scalar parameters and gradient. `params.sub_emissions` is always
    /// empty here; the tree edges live in `children`.
    pub params: EmitterConfig,
    pub children: Vec<ConfigId>,
}

/// Index-addressed arena of config nodes, the read-only backing store of a
/// [`ParticleSystem`](crate::ParticleSystem).
///
/// Particles reference nodes by [`ConfigId`] instead of borrowing into the
/// tree, so the pool and the configs can live side by side in one owner.
/// Node 0 is always the root.
#[derive(Clone, Debug)]
pub(crate) struct ConfigArena {
    nodes: Vec<ConfigNode>,
}

impl ConfigArena {
    /// Validate `root` and flatten its subtree, depth-first.
    pub fn build(root: &EmitterConfig) -> Result<Self, ConfigError> {
        root.validate()?;
        let mut nodes = Vec::new();
        Self::flatten(root, &mut nodes);
        Ok(Self { nodes })
    }

    fn flatten(config: &EmitterConfig, nodes: &mut Vec<ConfigNode>) -> ConfigId {
        let id = nodes.len();
        let mut params = config.clone();
        params.sub_emissions = Vec::new();
        nodes.push(ConfigNode {
            params,
            children: Vec::new(),
        });
        for child in &config.sub_emissions {
            let child_id = Self::flatten(child, nodes);
            nodes[id].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> ConfigId {
        0
    }

    pub fn node(&self, id: ConfigId) -> &ConfigNode {
        &self.nodes[id]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::Rgba;

    fn leaf() -> EmitterConfig {
        EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 0, 0, 0)))
    }

    #[test]
    fn test_builder_chain() {
        let config = leaf()
            .angle_range(-1.0, 1.0)
            .lifetime(2.5)
            .frequency(40.0)
            .kind(EmitKind::Burst)
            .burst_interval(0.5)
            .amount(EmitAmount::Single)
            .speed(180.0)
            .gravity(0.6)
            .size(6.0);

        assert_eq!(config.start_angle, -1.0);
        assert_eq!(config.end_angle, 1.0);
        assert_eq!(config.max_lifetime, 2.5);
        assert_eq!(config.spawn_frequency, 40.0);
        assert_eq!(config.kind, EmitKind::Burst);
        assert_eq!(config.burst_interval, 0.5);
        assert_eq!(config.amount, EmitAmount::Single);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_lifetime() {
        let err = leaf().lifetime(0.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLifetime(0.0));
    }

    #[test]
    fn test_rejects_non_finite_scalars() {
        // An infinite frequency is a rate the spawn loop could never
        // reach; infinite lifetimes and intervals are equally degenerate.
        let err = leaf().frequency(f32::INFINITY).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonFiniteParameter("spawn_frequency", f32::INFINITY)
        );
        let err = leaf().lifetime(f32::INFINITY).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteParameter("max_lifetime", _)));
        let err = leaf().burst_interval(f32::NEG_INFINITY).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteParameter("burst_interval", _)));
        let err = leaf().lifetime(f32::NAN).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteParameter("max_lifetime", _)));
        let err = leaf().speed(f32::INFINITY).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteParameter("particle_speed", _)));
    }

    #[test]
    fn test_rejects_negative_frequency_and_interval() {
        let err = leaf().frequency(-1.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::NegativeSpawnFrequency(-1.0));
        let err = leaf().burst_interval(-0.1).validate().unwrap_err();
        assert_eq!(err, ConfigError::NegativeBurstInterval(-0.1));
    }

    #[test]
    fn test_rejects_too_many_sub_emissions() {
        let mut config = leaf();
        for _ in 0..MAX_EMITTER_SLOTS + 1 {
            config = config.sub_emission(leaf());
        }
        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::TooManySubEmissions(MAX_EMITTER_SLOTS + 1));
    }

    #[test]
    fn test_validation_recurses_into_children() {
        let config = leaf().sub_emission(leaf().lifetime(-1.0));
        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLifetime(-1.0));
    }

    #[test]
    fn test_arena_flattens_depth_first() {
        let config = leaf()
            .sub_emission(leaf().frequency(10.0).sub_emission(leaf().frequency(20.0)))
            .sub_emission(leaf().frequency(30.0));
        let arena = ConfigArena::build(&config).unwrap();

        assert_eq!(arena.len(), 4);
        assert_eq!(arena.root(), 0);
        assert_eq!(arena.node(0).children, vec![1, 3]);
        assert_eq!(arena.node(1).params.spawn_frequency, 10.0);
        assert_eq!(arena.node(1).children, vec![2]);
        assert_eq!(arena.node(2).params.spawn_frequency, 20.0);
        assert_eq!(arena.node(3).params.spawn_frequency, 30.0);
        assert!(arena.node(0).params.sub_emissions.is_empty());
    }

    #[test]
    fn test_dump_lists_fields_and_subtree() {
        let config = leaf().frequency(1.5).sub_emission(leaf().frequency(40.0));
        let dump = config.to_string();
        assert!(dump.contains("spawn_frequency: 1.5"));
        assert!(dump.contains("child 0:"));
        assert!(dump.contains("spawn_frequency: 40"));
        assert!(dump.contains("color_stops: 2"));
    }
}
