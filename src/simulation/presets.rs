//! Transport preset save/load.
//!
//! Tuning presets are stored as human-readable YAML (.transport files) so
//! empirically tuned parameter sets can be shared between sessions and
//! machines without recompiling.

use std::path::Path;

use thiserror::Error;

use crate::simulation::config::TransportConfig;

#[derive(Error, Debug)]
pub enum PresetSaveError {
    #[error("Failed to serialize transport preset: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("Failed to write preset file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PresetLoadError {
    #[error("Failed to read preset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse transport preset: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Preset has zero pool capacity")]
    ZeroCapacity,
    #[error("Preset population floor {0} exceeds pool capacity {1}")]
    PopulationExceedsCapacity(usize, usize),
}

/// Write a preset to disk as YAML.
pub fn save_preset(config: &TransportConfig, path: &Path) -> Result<(), PresetSaveError> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    log::info!("Saved transport preset to {}", path.display());
    Ok(())
}

/// Read and validate a preset from disk.
pub fn load_preset(path: &Path) -> Result<TransportConfig, PresetLoadError> {
    let yaml = std::fs::read_to_string(path)?;
    let config: TransportConfig = serde_yaml::from_str(&yaml)?;

    if config.capacity == 0 {
        return Err(PresetLoadError::ZeroCapacity);
    }
    if config.min_population > config.capacity {
        return Err(PresetLoadError::PopulationExceedsCapacity(
            config.min_population,
            config.capacity,
        ));
    }

    log::info!("Loaded transport preset from {}", path.display());
    Ok(config)
}
