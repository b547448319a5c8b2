//! Headless demo driver.
//!
//! Runs the transport simulation without a renderer: a fixed 60 Hz frame
//! loop for a stretch of simulated time, logging each emitted transport
//! sample. Useful for eyeballing rate behavior when tuning constants.

use crate::controls::ControlState;
use crate::simulation::{MembraneSimulation, TransportConfig};

/// Simulated seconds the demo runs for.
const DEMO_DURATION_SECS: f32 = 20.0;
/// Frame delta (60 Hz).
const FRAME_DELTA: f32 = 1.0 / 60.0;

pub fn run() {
    env_logger::init();

    let config = TransportConfig::default();
    let mut sim = MembraneSimulation::new(config);

    let controls = ControlState {
        radius_um: 12.0,
        gradient: 0.6,
        temperature_c: 25.0,
    };
    sim.configure(controls.to_parameters());

    log::info!(
        "Starting membrane transport demo: radius={}µm gradient={} temp={}°C, {} particles",
        controls.radius_um,
        controls.gradient,
        controls.temperature_c,
        sim.particle_positions().len(),
    );

    let steps = (DEMO_DURATION_SECS / FRAME_DELTA) as usize;
    for _ in 0..steps {
        let report = sim.step(FRAME_DELTA);
        if let Some(sample) = report.sample {
            log::info!(
                "t={:5.1}s  in={:5.1}/s  out={:5.1}/s  occupancy {}/{}  bursts={}",
                sim.time(),
                sample.in_rate,
                sample.out_rate,
                sample.inside_count,
                sample.outside_count,
                sim.crossing_events().count(),
            );
        }
    }

    let (inside, outside) = sim.occupancy();
    log::info!(
        "Demo finished after {:.1}s simulated: {inside} inside, {outside} outside",
        sim.time(),
    );
}
