//! Simulation facade owning the pool, parameters, and aggregation state.
//!
//! One instance owns one pool and one aggregator; the host (render loop or
//! test harness) drives it with `configure` between frames and `step(delta)`
//! once per frame. There is no internal clock or thread — delta is always
//! caller-supplied.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::config::{SimulationParameters, TransportConfig};
use crate::simulation::crossing::{CrossingEvent, CrossingLog};
use crate::simulation::particle_pool::ParticlePool;
use crate::simulation::rates::{RateAggregator, TransportSample};
use crate::simulation::{reseed, step_engine};

/// Result of one `step` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReport {
    /// Genuine membrane crossings committed this step.
    pub crossings: usize,
    /// Rate/occupancy sample, present once per filled sampling window.
    pub sample: Option<TransportSample>,
}

/// The particle transport simulation.
pub struct MembraneSimulation {
    params: SimulationParameters,
    config: TransportConfig,
    pool: ParticlePool,
    rates: RateAggregator,
    crossings: CrossingLog,
    rng: StdRng,
    /// Simulated seconds accumulated across steps.
    clock: f32,
}

impl MembraneSimulation {
    /// Create a simulation with default parameters and an entropy-seeded RNG,
    /// reseeded and ready to step.
    pub fn new(config: TransportConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a simulation with a fixed seed for reproducible runs.
    pub fn with_seed(config: TransportConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TransportConfig, rng: StdRng) -> Self {
        let mut sim = Self {
            params: SimulationParameters::default().clamped(),
            pool: ParticlePool::new(config.capacity),
            rates: RateAggregator::new(config.sample_window),
            crossings: CrossingLog::new(config.event_capacity, config.event_ttl),
            config,
            rng,
            clock: 0.0,
        };
        sim.reseed();
        sim
    }

    /// Apply a new parameter snapshot, clamped to the core valid ranges.
    ///
    /// Must be called between steps, never mid-step. A change in radius or
    /// gradient rebuilds the population (the occupancy targets depend on
    /// both); a temperature-only change just alters step kinetics.
    pub fn configure(&mut self, params: SimulationParameters) {
        let clamped = params.clamped();
        let needs_reseed = clamped.radius_um != self.params.radius_um
            || clamped.gradient != self.params.gradient;
        self.params = clamped;
        if needs_reseed {
            self.reseed();
        }
    }

    /// Redistribute the population for the current parameters and discard
    /// in-flight window counts and burst events, which describe a population
    /// that no longer exists.
    pub fn reseed(&mut self) {
        reseed::reseed(&mut self.pool, &self.params, &self.config, &mut self.rng);
        self.rates.reset();
        self.crossings.clear();
    }

    /// Advance the simulation by `delta` seconds.
    ///
    /// A non-positive delta is a strict no-op: positions, velocities, side
    /// flags, window counters, and the random source are all untouched.
    pub fn step(&mut self, delta: f32) -> StepReport {
        if delta <= 0.0 {
            return StepReport::default();
        }

        self.crossings.advance(delta);
        let crossings = step_engine::step_particles(
            &mut self.pool,
            &self.params,
            &self.config,
            delta,
            &mut self.rng,
            &mut self.crossings,
            &mut self.rates,
        );
        self.clock += delta;

        let sample = self
            .rates
            .advance(delta, self.pool.inside_count(), self.pool.outside_count());
        if let Some(sample) = &sample {
            log::debug!(
                "t={:.1}s in_rate={:.1}/s out_rate={:.1}/s inside={} outside={}",
                self.clock,
                sample.in_rate,
                sample.out_rate,
                sample.inside_count,
                sample.outside_count,
            );
        }

        StepReport { crossings, sample }
    }

    /// Current (clamped) parameter snapshot.
    pub fn parameters(&self) -> SimulationParameters {
        self.params
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Simulated seconds elapsed since creation.
    pub fn time(&self) -> f32 {
        self.clock
    }

    /// Active particle positions, for rendering.
    pub fn particle_positions(&self) -> &[Vec3] {
        self.pool.active_positions()
    }

    /// Active particle side flags (`true` = outside), for coloring.
    pub fn particle_sides(&self) -> &[bool] {
        self.pool.active_sides()
    }

    /// Live crossing events with their ages, for burst effects.
    pub fn crossing_events(&self) -> impl Iterator<Item = &CrossingEvent> {
        self.crossings.iter()
    }

    /// Event time-to-live, for computing burst fade from event age.
    pub fn event_ttl(&self) -> f32 {
        self.crossings.ttl()
    }

    /// Current `(inside, outside)` occupancy of the active population.
    pub fn occupancy(&self) -> (usize, usize) {
        (self.pool.inside_count(), self.pool.outside_count())
    }

    /// Direct pool access for harnesses that need to inspect raw state.
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }
}
