use serde::{Deserialize, Serialize};

/// Core clamp range for membrane radius (µm).
pub const RADIUS_RANGE_UM: (f32, f32) = (1.0, 200.0);
/// Core clamp range for concentration gradient (dimensionless).
pub const GRADIENT_RANGE: (f32, f32) = (0.0, 1.0);
/// Core clamp range for temperature (°C).
pub const TEMPERATURE_RANGE_C: (f32, f32) = (-10.0, 80.0);

/// Membrane radius at which the kinetic scale factors equal 1.0.
pub const REFERENCE_RADIUS_UM: f32 = 12.0;

/// Externally owned parameter snapshot, read-only to the core during a step.
///
/// Values are clamped on entry via [`SimulationParameters::clamped`] rather
/// than rejected. The UI layer applies its own tighter slider ranges before
/// handing a snapshot over (see [`crate::controls`]); the two clamp layers
/// are intentionally independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Membrane sphere radius (µm).
    pub radius_um: f32,
    /// Concentration gradient across the membrane, 0 = none, 1 = maximal.
    pub gradient: f32,
    /// Ambient temperature (°C).
    pub temperature_c: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            radius_um: 12.0,
            gradient: 0.5,
            temperature_c: 25.0,
        }
    }
}

impl SimulationParameters {
    /// Return a copy with every field clamped to the core valid range.
    pub fn clamped(self) -> Self {
        Self {
            radius_um: self.radius_um.clamp(RADIUS_RANGE_UM.0, RADIUS_RANGE_UM.1),
            gradient: self.gradient.clamp(GRADIENT_RANGE.0, GRADIENT_RANGE.1),
            temperature_c: self
                .temperature_c
                .clamp(TEMPERATURE_RANGE_C.0, TEMPERATURE_RANGE_C.1),
        }
    }

    /// Thermal speed multiplier, linear in normalized temperature.
    ///
    /// Spans [0.6, 2.4] over the core temperature range, so a warm cell
    /// equilibrates visibly faster than a cold one without ever freezing
    /// the walk entirely.
    pub fn speed_factor(&self) -> f32 {
        let t = (self.temperature_c - TEMPERATURE_RANGE_C.0)
            / (TEMPERATURE_RANGE_C.1 - TEMPERATURE_RANGE_C.0);
        0.6 + 1.8 * t.clamp(0.0, 1.0)
    }

    /// Scale multiplier inversely proportional to membrane radius.
    ///
    /// Larger cells move their particles relatively slower, modeling slower
    /// equilibration at scale.
    pub fn radius_factor(&self) -> f32 {
        (REFERENCE_RADIUS_UM / self.radius_um.max(RADIUS_RANGE_UM.0)).clamp(0.12, 3.0)
    }
}

/// Tuning constants for the particle transport simulation.
///
/// Shared by the step engine, the reseed policy, and the aggregation layer.
/// Values are empirical — chosen for visual behavior, not physical accuracy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Fixed-capacity particle pool size.
    pub capacity: usize,

    /// Active population at gradient = 0 (grows linearly to `capacity` at 1).
    pub min_population: usize,

    /// Base random acceleration impulse (µm/s² before kinetic scaling).
    pub base_accel: f32,

    /// Position integration scale (multiplied by the same kinetic factors).
    pub move_scale: f32,

    /// Per-second velocity retention, < 1 (applied as retention^delta).
    pub velocity_retention: f32,

    /// Inner containment bound as a fraction of membrane radius.
    pub min_radius_frac: f32,

    /// Outer containment bound as a fraction of membrane radius.
    pub max_radius_frac: f32,

    /// Inward crossing rate constant at gradient = 0 (1/s).
    pub enter_rate_base: f32,

    /// Additional inward rate at gradient = 1 (1/s).
    pub enter_rate_span: f32,

    /// Outward crossing rate constant at gradient = 0 (1/s).
    pub exit_rate_base: f32,

    /// Outward rate reduction at gradient = 1 (1/s, subtracted).
    pub exit_rate_span: f32,

    /// Inside occupancy fraction at gradient = 0.
    pub inside_fraction_base: f32,

    /// Additional inside fraction at gradient = 1.
    pub inside_fraction_span: f32,

    /// Reseed placement shell for inside particles, fractions of radius.
    pub inside_shell_frac: (f32, f32),

    /// Reseed placement shell for outside particles, fractions of radius.
    pub outside_shell_frac: (f32, f32),

    /// Initial speed of reseeded particles (µm/s).
    pub seed_speed: f32,

    /// Crossing-rate sampling window (seconds of simulated time).
    pub sample_window: f32,

    /// Crossing event time-to-live for the renderer-facing queue (seconds).
    pub event_ttl: f32,

    /// Hard cap on retained crossing events.
    pub event_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            capacity: 900,
            min_population: 180,
            base_accel: 26.0,
            move_scale: 1.0,
            velocity_retention: 0.12,
            min_radius_frac: 0.04,
            max_radius_frac: 2.6,
            enter_rate_base: 0.9,
            enter_rate_span: 3.6,
            exit_rate_base: 3.3,
            exit_rate_span: 2.4,
            inside_fraction_base: 0.18,
            inside_fraction_span: 0.56,
            inside_shell_frac: (0.25, 0.85),
            outside_shell_frac: (1.15, 1.9),
            seed_speed: 2.0,
            sample_window: 1.0,
            event_ttl: 0.9,
            event_capacity: 256,
        }
    }
}

/// Floor applied to direction-specific rate constants so neither membrane
/// direction ever becomes a hard wall, whatever the gradient.
const MIN_CROSSING_RATE: f32 = 0.05;

impl TransportConfig {
    /// Inward (outside → inside) rate constant for a given gradient (1/s).
    pub fn enter_rate(&self, gradient: f32) -> f32 {
        (self.enter_rate_base + self.enter_rate_span * gradient).max(MIN_CROSSING_RATE)
    }

    /// Outward (inside → outside) rate constant for a given gradient (1/s).
    pub fn exit_rate(&self, gradient: f32) -> f32 {
        (self.exit_rate_base - self.exit_rate_span * gradient).max(MIN_CROSSING_RATE)
    }
}
