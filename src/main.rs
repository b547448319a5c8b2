//! # Membrane-Spheres Demo Entry Point
//!
//! Runs the headless transport demo. Set `RUST_LOG=info` to see the
//! per-window transport samples.

fn main() {
    membrane_spheres::demo::run();
}
