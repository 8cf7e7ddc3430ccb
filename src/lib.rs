//! Wavefield - procedural FFT ocean wave synthesis.
//!
//! Statistical wave spectra (Phillips or a Bruneton-style unified
//! directional spectrum) seed a grid of gaussian Fourier amplitudes, which
//! are time-evolved through the quantized deep-water dispersion relation and
//! transformed into a tiling vector-displacement field by an inverse 2D FFT.
//! A dedicated background worker keeps the consumer thread free of FFT cost.

pub mod cli;
pub mod dispersion;
pub mod error;
pub mod generator;
pub mod initial;
pub mod params;
pub mod random;
pub mod spectrum;
pub mod synthesizer;

pub use error::ConfigError;
pub use generator::AsyncDisplacementGenerator;
pub use params::OceanGeneratorConfig;
pub use synthesizer::SpectralFieldSynthesizer;
