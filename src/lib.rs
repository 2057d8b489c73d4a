//! # Sparkly - Recursive Particle Effects
//!
//! CPU particle simulation with recursive emitters: every particle can
//! itself emit particles, so a whole fireworks display is one config tree.
//!
//! ## Quick Start
//!
//! ```
//! use sparkly::prelude::*;
//!
//! // A rocket that dies after a second and bursts into sparks.
//! let sparks = EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 80, 0, 0)))
//!     .lifetime(0.8)
//!     .frequency(40.0)
//!     .speed(120.0);
//!
//! let rocket = EmitterConfig::new(Gradient::fade(Rgba::WHITE, Rgba::new(255, 255, 255, 0)))
//!     .lifetime(1.0)
//!     .frequency(1.0)
//!     .speed(250.0)
//!     .gravity(0.5)
//!     .sub_emission(sparks);
//!
//! let mut system = ParticleSystem::new(rocket).unwrap();
//! system.advance(1.0 / 60.0);
//! assert!(!system.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! ### Emitter configs
//!
//! An [`EmitterConfig`] describes one particle species: how long it lives,
//! how fast it spawns, its size, speed, gravity, and its color over age as
//! a [`Gradient`]. Configs nest through [`EmitterConfig::sub_emission`]:
//! each child config is a species the parent's particles emit in turn.
//!
//! ### Spawn rate
//!
//! Frequency is a target average. Each emitter tracks how many particles
//! it has emitted over its lifetime and emits enough per frame to keep
//! `emitted / age` at the configured frequency, so a stalled frame is
//! caught up on the next one.
//!
//! ### Bursts
//!
//! With [`EmitKind::Burst`] an emitter only emits in the frames that cross
//! a multiple of its `burst_interval`. The schedule is anchored to the
//! emitter's birth, so late frames do not drift it.
//!
//! ### Rendering
//!
//! The simulation renders through the [`Surface`] and [`Sprite`] traits.
//! The built-in [`canvas::Canvas`] draws tinted sprite quads with wgpu;
//! tests substitute a recording double.

pub mod canvas;
pub mod emitter;
pub mod error;
pub mod gradient;
pub mod particle;
pub mod render;
pub mod system;
pub mod texture;
pub mod time;
pub mod window;

pub use emitter::{ConfigId, EmitAmount, EmitKind, EmitterConfig};
pub use error::{ConfigError, GpuError, RunError, TextureError};
pub use glam::Vec2;
pub use gradient::{ColorStop, Gradient, Rgba, MAX_COLOR_STOPS};
pub use particle::{EmitterSlot, Particle, MAX_EMITTER_SLOTS};
pub use render::{Rect, Sprite, Surface};
pub use system::{ParticleSystem, DEFAULT_CAPACITY};
pub use texture::SpriteImage;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```
/// use sparkly::prelude::*;
/// ```
pub mod prelude {
    pub use crate::emitter::{ConfigId, EmitAmount, EmitKind, EmitterConfig};
    pub use crate::gradient::{ColorStop, Gradient, Rgba};
    pub use crate::render::{Rect, Sprite, Surface};
    pub use crate::system::ParticleSystem;
    pub use crate::texture::SpriteImage;
    pub use crate::time::Time;
    pub use crate::Vec2;
}
