//! Per-frame particle stepping.
//!
//! Free functions over the SoA pool, in execution order per particle:
//! random acceleration impulse, exponential velocity damping, position
//! integration, membrane permeability resolution, radial containment clamp,
//! and crossing detection. One call advances every active particle exactly
//! once; the caller supplies the elapsed delta and the random source.

use glam::Vec3;
use rand::Rng;

use crate::simulation::config::{SimulationParameters, TransportConfig};
use crate::simulation::crossing::{CrossingKind, CrossingLog};
use crate::simulation::particle_pool::ParticlePool;
use crate::simulation::rates::RateAggregator;

/// Distance floor for radial normalization.
const MIN_DISTANCE: f32 = 1.0e-4;

/// How far inside/outside the membrane a reflected particle lands, as a
/// fraction of radius. Keeps the side classification unambiguous.
const REFLECT_MARGIN_FRAC: f32 = 1.0e-4;

/// Uniform random direction on the unit sphere.
pub(crate) fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let azimuth: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let planar = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(planar * azimuth.cos(), planar * azimuth.sin(), z)
}

/// Probability that at least one crossing succeeds within `delta` seconds at
/// rate constant `rate` (1/s).
///
/// Continuous-time form, exact for any delta. The first-order `rate * delta`
/// approximation overshoots past 1.0 for large deltas and is not used.
pub fn crossing_probability(rate: f32, delta: f32) -> f32 {
    1.0 - (-rate * delta).exp()
}

/// Specular reflection of a particle back across the membrane.
///
/// Mirrors the radial position component to just inside (rejected exit) or
/// just outside (rejected enter) the membrane and inverts the radial
/// velocity component, so a rejected particle moves away from the boundary
/// instead of oscillating against it.
pub fn reflect_radial(
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    was_outside: bool,
) -> (Vec3, Vec3) {
    let dist = position.length().max(MIN_DISTANCE);
    let outward = position / dist;

    let mirrored = 2.0 * radius - dist;
    let margin = radius * REFLECT_MARGIN_FRAC;
    let settled = if was_outside {
        // Rejected enter: stay strictly outside
        mirrored.max(radius + margin)
    } else {
        // Rejected exit: stay strictly inside. The lower bound covers an
        // overshoot past 2R in a single step, where the mirror would land
        // beyond the center.
        mirrored.clamp(margin, radius - margin)
    };

    let radial_speed = velocity.dot(outward);
    (
        outward * settled,
        velocity - 2.0 * radial_speed * outward,
    )
}

/// Rescale the radial distance into the soft containment band.
///
/// Visual containment only — keeps stragglers from escaping to infinity or
/// collapsing onto the center. The band never straddles the membrane, so
/// clamping cannot change a particle's side.
fn contain_radius(position: Vec3, min_r: f32, max_r: f32) -> Vec3 {
    let dist = position.length().max(MIN_DISTANCE);
    let clamped = dist.clamp(min_r, max_r);
    if clamped == dist {
        position
    } else {
        position * (clamped / dist)
    }
}

/// Advance every active particle by one `delta`-second step.
///
/// Genuine crossings are pushed to `log` and counted by `rates`; rejected
/// crossings reflect and register nothing. Returns the number of genuine
/// crossings committed this step.
///
/// `delta` is assumed non-negative and bounded by the caller. Randomness is
/// drawn independently per particle per step from `rng`.
pub fn step_particles<R: Rng>(
    pool: &mut ParticlePool,
    params: &SimulationParameters,
    config: &TransportConfig,
    delta: f32,
    rng: &mut R,
    log: &mut CrossingLog,
    rates: &mut RateAggregator,
) -> usize {
    let radius = params.radius_um;
    let kinetic = params.speed_factor() * params.radius_factor();
    let accel = config.base_accel * kinetic;
    let move_scale = config.move_scale * kinetic;
    let retention = config.velocity_retention.powf(delta);

    let p_enter = crossing_probability(config.enter_rate(params.gradient), delta);
    let p_exit = crossing_probability(config.exit_rate(params.gradient), delta);

    let min_r = config.min_radius_frac * radius;
    let max_r = config.max_radius_frac * radius;

    let mut crossings = 0;
    for i in 0..pool.active_count {
        let dist0 = pool.positions[i].length();

        // Biased random walk: isotropic impulse, exponential damping,
        // then position integration.
        pool.velocities[i] += random_unit_vector(rng) * accel * delta;
        pool.velocities[i] *= retention;
        pool.positions[i] += pool.velocities[i] * delta * move_scale;

        let dist1 = pool.positions[i].length();

        // Membrane permeability: a radial step across R either passes or
        // reflects, decided by one uniform draw per attempted crossing.
        let exiting = dist0 < radius && dist1 >= radius;
        let entering = dist0 >= radius && dist1 < radius;
        if exiting || entering {
            let p_cross = if exiting { p_exit } else { p_enter };
            if rng.gen::<f32>() > p_cross {
                let (position, velocity) = reflect_radial(
                    pool.positions[i],
                    pool.velocities[i],
                    radius,
                    pool.outside[i],
                );
                pool.positions[i] = position;
                pool.velocities[i] = velocity;
            }
        }

        pool.positions[i] = contain_radius(pool.positions[i], min_r, max_r);

        // Crossing detection: exactly once per particle per step, against
        // the stored side flag. Reflection above kept rejected particles on
        // their original side, so only genuine crossings reach this point.
        let dist = pool.positions[i].length().max(MIN_DISTANCE);
        let now_outside = dist >= radius;
        if now_outside != pool.outside[i] {
            let outward = pool.positions[i] / dist;
            let kind = if now_outside {
                CrossingKind::Exit
            } else {
                CrossingKind::Enter
            };
            log.push(kind, outward * radius, outward);
            rates.record(kind);
            pool.outside[i] = now_outside;
            crossings += 1;
        }

        debug_assert_eq!(
            pool.outside[i],
            pool.positions[i].length() >= radius,
            "side flag desynchronized for particle {i}"
        );
    }

    crossings
}
