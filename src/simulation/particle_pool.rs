//! # Particle Pool - Structure-of-Arrays Layout
//!
//! Central state container for the transport simulation. All particle data
//! lives in flat per-property arrays, pre-allocated to a fixed capacity, so
//! the per-frame step iterates cache-friendly slices and never allocates.
//!
//! ## Capacity vs Active Count
//!
//! - `capacity` — maximum number of particles, fixed at creation.
//! - `active_count` — particles currently simulated (≤ capacity). Activity is
//!   implicit: index < `active_count` is active. Deactivated slots are parked
//!   far from the scene with zero velocity rather than removed, so shrinking
//!   and regrowing the population never reallocates or shuffles indices.
//!
//! ## Side Flags
//!
//! `outside[i]` is the authoritative record of which side of the membrane a
//! particle was on after its last completed step. The step engine compares it
//! against the freshly integrated position to detect crossings, then rewrites
//! it — it is never re-derived redundantly mid-step.

use glam::Vec3;

/// Where deactivated particles are parked, far outside any plausible scene.
pub const PARK_POSITION: Vec3 = Vec3::new(1.0e6, 1.0e6, 1.0e6);

/// Fixed-capacity particle arena in Structure-of-Arrays layout.
#[derive(Clone)]
pub struct ParticlePool {
    /// Maximum number of particles. Arrays are allocated to this size once.
    pub capacity: usize,

    /// Number of currently simulated particles (≤ capacity).
    pub active_count: usize,

    /// World positions relative to the cell center (µm).
    pub positions: Vec<Vec3>,

    /// Random-walk velocity state (µm/s).
    pub velocities: Vec<Vec3>,

    /// Last-known membrane side: `true` = outside (|position| ≥ R).
    pub outside: Vec<bool>,
}

impl ParticlePool {
    /// Create a pool with all slots parked.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            active_count: 0,
            positions: vec![PARK_POSITION; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            outside: vec![true; capacity],
        }
    }

    /// Park one slot: move it far from the scene, zero its velocity, and
    /// mark it outside so a later reactivation cannot register a spurious
    /// enter event.
    pub fn park(&mut self, index: usize) {
        self.positions[index] = PARK_POSITION;
        self.velocities[index] = Vec3::ZERO;
        self.outside[index] = true;
    }

    /// Count active particles currently flagged inside the membrane.
    pub fn inside_count(&self) -> usize {
        self.outside[..self.active_count]
            .iter()
            .filter(|&&o| !o)
            .count()
    }

    /// Count active particles currently flagged outside the membrane.
    pub fn outside_count(&self) -> usize {
        self.active_count - self.inside_count()
    }

    /// Positions of the active population (renderer-facing, read-only).
    pub fn active_positions(&self) -> &[Vec3] {
        &self.positions[..self.active_count]
    }

    /// Side flags of the active population (renderer-facing, for coloring).
    pub fn active_sides(&self) -> &[bool] {
        &self.outside[..self.active_count]
    }

    /// Verify the side invariant for every active particle.
    ///
    /// A desynchronized side flag silently corrupts future crossing counts,
    /// so the step engine debug-asserts this after every completed step.
    pub fn sides_consistent(&self, radius: f32) -> bool {
        (0..self.active_count)
            .all(|i| self.outside[i] == (self.positions[i].length() >= radius))
    }
}
