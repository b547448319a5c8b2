//! # Membrane-Spheres: Particle Transport Core
//!
//! Membrane-Spheres is the simulation core of a membrane diffusion
//! visualizer: a spherical cell exchanges particles with its surroundings,
//! and the exchange rate depends on membrane radius, concentration gradient,
//! and temperature. This crate owns the part with real state and
//! time-stepping semantics — the particle population, the stochastic
//! membrane boundary, and the rate aggregation. Rendering, camera controls,
//! and the slider UI are external collaborators that consume its outputs.
//!
//! ## Architecture Overview
//!
//! ### Simulation Engine ([`simulation`])
//!
//! - [`simulation::ParticlePool`] - Structure-of-Arrays arena for all
//!   particle state (positions, velocities, membrane-side flags)
//! - [`simulation::step_engine`] - per-frame stepping: biased random walk,
//!   stochastic membrane crossing, containment, crossing detection
//! - [`simulation::MembraneSimulation`] - facade wiring pool, parameters,
//!   event queue, and rate aggregation behind `configure`/`step`/`reseed`
//! - [`simulation::TransportConfig`] - empirical tuning constants, with
//!   YAML preset save/load in [`simulation::presets`]
//!
//! **Key Design**: SoA layout with a fixed-capacity pool — population
//! changes park and reactivate slots instead of reallocating.
//!
//! ### Parameter Glue ([`controls`])
//!
//! UI-facing slider ranges, deliberately tighter than the core clamps and
//! kept independent of them.
//!
//! ### Demo Driver ([`demo`])
//!
//! Headless 60 Hz loop logging transport samples; the library has no clock
//! of its own, so any host that calls `step(delta)` works the same way.
//!
//! ## Data Flow
//!
//! ```text
//! ControlState → configure → MembraneSimulation::step(delta)
//!     → ParticlePool (mutated in place)
//!     → crossing events (bounded TTL queue, renderer bursts)
//!     → RateAggregator → TransportSample (rates + occupancy, ~1s cadence)
//! ```
//!
//! ## Dependencies
//!
//! - **Math**: `glam` (SIMD math types)
//! - **Randomness**: `rand` (injectable via `Rng`-generic stepping;
//!   tests use seeded `rand_chacha`)
//! - **Serialization**: `serde` + `serde_yaml` (transport presets)
//! - **Diagnostics**: `log` + `env_logger` (demo binary)

pub mod controls;
pub mod demo;
pub mod simulation;
