//! UI-facing parameter glue.
//!
//! The slider layer exposes deliberately tighter ranges than the core accepts
//! (radius 4–30 µm, temperature 0–60 °C): the visualization reads best in
//! that band, while the simulation itself tolerates the wider core ranges.
//! The two clamp layers are independent and must stay that way — a host
//! bypassing the sliders still gets core clamping on `configure`.

use serde::{Deserialize, Serialize};

use crate::simulation::SimulationParameters;

/// Slider range for membrane radius (µm).
pub const RADIUS_CONTROL_UM: (f32, f32) = (4.0, 30.0);
/// Slider range for concentration gradient.
pub const GRADIENT_CONTROL: (f32, f32) = (0.0, 1.0);
/// Slider range for temperature (°C).
pub const TEMPERATURE_CONTROL_C: (f32, f32) = (0.0, 60.0);

/// Raw slider state as the UI owns it, before any clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub radius_um: f32,
    pub gradient: f32,
    pub temperature_c: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            radius_um: 12.0,
            gradient: 0.5,
            temperature_c: 25.0,
        }
    }
}

impl ControlState {
    /// Clamp every field to its slider range.
    pub fn clamped(self) -> Self {
        Self {
            radius_um: self.radius_um.clamp(RADIUS_CONTROL_UM.0, RADIUS_CONTROL_UM.1),
            gradient: self.gradient.clamp(GRADIENT_CONTROL.0, GRADIENT_CONTROL.1),
            temperature_c: self
                .temperature_c
                .clamp(TEMPERATURE_CONTROL_C.0, TEMPERATURE_CONTROL_C.1),
        }
    }

    /// Produce the parameter snapshot handed to the simulation core.
    pub fn to_parameters(self) -> SimulationParameters {
        let c = self.clamped();
        SimulationParameters {
            radius_um: c.radius_um,
            gradient: c.gradient,
            temperature_c: c.temperature_c,
        }
    }
}
