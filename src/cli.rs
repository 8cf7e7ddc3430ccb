//! Command-line argument parsing.

use clap::Parser;
use glam::Vec2;

use crate::params::{NoiseSourceKind, OceanGeneratorConfig, SpectrumModelKind};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavefield")]
#[command(about = "FFT ocean displacement field generator", long_about = None)]
pub struct Args {
    /// Grid resolution per side (power of two)
    #[arg(long, default_value = "256")]
    pub resolution: usize,

    /// World-space tile size in meters
    #[arg(long, value_name = "METERS", default_value = "1000")]
    pub world_size: f32,

    /// Wind speed in m/s, blowing along +X
    #[arg(long, value_name = "M_PER_S", default_value = "10")]
    pub wind_speed: f32,

    /// Simulation time to synthesize, in seconds
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub time: f64,

    /// Random seed for the initial spectrum
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Spectrum model: phillips or bruenton
    #[arg(long, default_value = "bruenton")]
    pub spectrum: String,

    /// Gaussian source: seeded or hash
    #[arg(long, default_value = "seeded")]
    pub noise: String,

    /// Output PNG path for the height visualization
    #[arg(long, value_name = "PATH", default_value = "displacement.png")]
    pub output: String,
}

impl Args {
    /// Build a generator configuration from the parsed arguments.
    pub fn create_config(&self) -> OceanGeneratorConfig {
        let spectrum_model = match self.spectrum.to_lowercase().as_str() {
            "phillips" => SpectrumModelKind::Phillips,
            "bruenton" => SpectrumModelKind::Bruenton,
            other => {
                eprintln!("Warning: unknown spectrum model '{}', using bruenton", other);
                SpectrumModelKind::Bruenton
            }
        };

        let noise_source = match self.noise.to_lowercase().as_str() {
            "seeded" => NoiseSourceKind::Seeded,
            "hash" => NoiseSourceKind::Hash,
            other => {
                eprintln!("Warning: unknown noise source '{}', using seeded", other);
                NoiseSourceKind::Seeded
            }
        };

        OceanGeneratorConfig {
            resolution: self.resolution,
            world_size_m: self.world_size,
            wind_velocity: Vec2::new(self.wind_speed, 0.0),
            seed: self.seed,
            spectrum_model,
            noise_source,
            ..Default::default()
        }
    }
}
