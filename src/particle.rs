//! Live particle state.
//!
//! A [`Particle`] is a plain value: kinematics, age, an optional owning
//! config, and a small fixed set of [`EmitterSlot`]s for whichever
//! sub-emissions it is currently re-emitting. Particles are copied in and
//! out of the pool by value and removed by swap; nothing here is heap
//! allocated, so the pool stays a single contiguous buffer.

use glam::Vec2;

use crate::emitter::ConfigId;

/// Upper bound on emitter slots per particle, and therefore on
/// sub-emissions per config.
pub const MAX_EMITTER_SLOTS: usize = 8;

/// Per-slot emission state: which config this slot spawns from, how many
/// particles it has spawned so far, and when it last burst.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmitterSlot {
    /// The config this slot emits from.
    pub config: ConfigId,
    /// Emitting particle's age at the last anchored burst, seconds.
    pub last_burst_time: f32,
    /// Total particles this slot has spawned over the particle's lifetime.
    pub emit_count: u64,
}

impl EmitterSlot {
    pub fn new(config: ConfigId) -> Self {
        Self {
            config,
            last_burst_time: 0.0,
            emit_count: 0,
        }
    }
}

/// One live particle.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Position in surface coordinates.
    pub position: Vec2,
    /// Unit direction; the owning config's speed is applied at integration.
    pub velocity: Vec2,
    /// Seconds since spawn.
    pub age: f32,
    /// The config whose gradient, lifetime and gravity govern this
    /// particle. `None` only for the synthetic seed, which has no visual
    /// form and never expires.
    pub config: Option<ConfigId>,
    slots: [EmitterSlot; MAX_EMITTER_SLOTS],
    slot_count: u8,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, config: Option<ConfigId>) -> Self {
        Self {
            position,
            velocity,
            age: 0.0,
            config,
            slots: [EmitterSlot::default(); MAX_EMITTER_SLOTS],
            slot_count: 0,
        }
    }

    /// Bind one more emitter slot to `config`.
    ///
    /// Config validation caps sub-emissions at [`MAX_EMITTER_SLOTS`], so
    /// this cannot overflow for particles spawned by the engine.
    pub fn push_slot(&mut self, config: ConfigId) {
        debug_assert!((self.slot_count as usize) < MAX_EMITTER_SLOTS);
        if (self.slot_count as usize) < MAX_EMITTER_SLOTS {
            self.slots[self.slot_count as usize] = EmitterSlot::new(config);
            self.slot_count += 1;
        }
    }

    /// The live emitter slots.
    pub fn slots(&self) -> &[EmitterSlot] {
        &self.slots[..self.slot_count as usize]
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [EmitterSlot] {
        &mut self.slots[..self.slot_count as usize]
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_has_no_slots() {
        let p = Particle::new(Vec2::ZERO, Vec2::Y, Some(0));
        assert_eq!(p.slot_count(), 0);
        assert!(p.slots().is_empty());
        assert_eq!(p.age, 0.0);
    }

    #[test]
    fn test_push_slot_starts_zeroed() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::Y, None);
        p.push_slot(3);
        p.push_slot(5);
        assert_eq!(p.slot_count(), 2);
        assert_eq!(p.slots()[0], EmitterSlot::new(3));
        assert_eq!(p.slots()[1].config, 5);
        assert_eq!(p.slots()[1].emit_count, 0);
        assert_eq!(p.slots()[1].last_burst_time, 0.0);
    }

    #[test]
    fn test_slot_storage_is_bounded() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::Y, None);
        for i in 0..MAX_EMITTER_SLOTS {
            p.push_slot(i);
        }
        assert_eq!(p.slot_count(), MAX_EMITTER_SLOTS);
    }
}
