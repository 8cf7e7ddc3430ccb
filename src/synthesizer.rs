//! Spectral synthesis of the vector displacement field.
//!
//! For a given simulation time the synthesizer evolves the initial spectrum
//! through the dispersion relation, derives the two horizontal choppy-wave
//! spectra, runs an inverse 2D FFT over all three complex grids, and packs
//! the real parts into one `Vec<glam::Vec3>` displacement image.

use glam::{Vec2, Vec3, Vec4};
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::dispersion::{ComplexBatch, DispersionEvaluator};
use crate::error::ConfigError;
use crate::initial::InitialSpectrum;
use crate::params::{NoiseSourceKind, OceanGeneratorConfig};
use crate::random::{HashNormal, NormalSource, SeededNormal};
use crate::spectrum::WaveSpectrum;

pub struct SpectralFieldSynthesizer {
    config: OceanGeneratorConfig,
    initial: InitialSpectrum,
    dispersion: DispersionEvaluator,

    // Row transform of length N; the 2D pass runs it over rows and columns.
    fft: Arc<dyn Fft<f32>>,
    fft_scratch: Vec<Complex32>,
    transpose_scratch: Vec<Complex32>,

    spectrum_vertical: Vec<Complex32>,
    spectrum_horizontal_x: Vec<Complex32>,
    spectrum_horizontal_z: Vec<Complex32>,
}

impl SpectralFieldSynthesizer {
    pub fn new(config: OceanGeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = config.resolution * config.resolution;
        let mut planner = FftPlanner::new();
        // Forward transform: the (-1)^(n+m) shift in the output stage makes
        // it act as the inverse for the center-symmetric spectrum.
        let fft = planner.plan_fft_forward(config.resolution);
        let fft_scratch = vec![Complex32::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        let initial = Self::build_initial(&config);
        let dispersion = DispersionEvaluator::new(config.gravity, config.dispersion_loop_period_s);

        Ok(Self {
            initial,
            dispersion,
            fft,
            fft_scratch,
            transpose_scratch: vec![Complex32::new(0.0, 0.0); size],
            spectrum_vertical: vec![Complex32::new(0.0, 0.0); size],
            spectrum_horizontal_x: vec![Complex32::new(0.0, 0.0); size],
            spectrum_horizontal_z: vec![Complex32::new(0.0, 0.0); size],
            config,
        })
    }

    fn build_initial(config: &OceanGeneratorConfig) -> InitialSpectrum {
        let spectrum = WaveSpectrum::from_config(config);
        let mut source: Box<dyn NormalSource> = match config.noise_source {
            NoiseSourceKind::Seeded => Box::new(SeededNormal::new(config.seed)),
            NoiseSourceKind::Hash => Box::new(HashNormal::new(config.seed as u32)),
        };
        InitialSpectrum::build(
            &spectrum,
            source.as_mut(),
            config.resolution,
            config.delta_k(),
        )
    }

    /// Replace the wind and rebuild the initial spectrum in full.
    ///
    /// Every cell's spectral density depends on the wind vector, so there is
    /// no incremental update path.
    pub fn set_wind_velocity(&mut self, wind_velocity: Vec2) {
        self.config.wind_velocity = wind_velocity;
        self.initial = Self::build_initial(&self.config);
    }

    /// Change the wind speed while keeping the current heading.
    pub fn set_wind_speed(&mut self, wind_speed: f32) {
        let heading = self.config.wind_velocity.normalize_or(Vec2::X);
        self.set_wind_velocity(heading * wind_speed);
    }

    pub fn wind_velocity(&self) -> Vec2 {
        self.config.wind_velocity
    }

    pub fn world_size(&self) -> f32 {
        self.config.world_size_m
    }

    pub fn resolution(&self) -> usize {
        self.config.resolution
    }

    /// Synthesize the displacement image for simulation time `time_s`.
    ///
    /// Output pixels are `(horizontal-x, horizontal-z, vertical)` in meters,
    /// row-major. All components are finite; numerical anomalies near the
    /// zero wavevector substitute zero rather than poisoning the image.
    pub fn generate(&mut self, time_s: f32, out: &mut Vec<Vec3>) {
        let n = self.config.resolution;
        let one_on_world_size = 1.0 / self.config.world_size_m;
        out.resize(n * n, Vec3::ZERO);

        // Evolve the spectrum and derive the choppy displacement spectra,
        // four wavevectors per batch
        for m in 0..n {
            let kz = Vec4::splat(PI * (2.0 * m as f32 - n as f32) * one_on_world_size);
            for batch_start in (0..n).step_by(4) {
                let lane_n = Vec4::new(
                    batch_start as f32,
                    batch_start as f32 + 1.0,
                    batch_start as f32 + 2.0,
                    batch_start as f32 + 3.0,
                );
                let kx = (lane_n * 2.0 - Vec4::splat(n as f32)) * (PI * one_on_world_size);
                // Epsilon keeps the k-hat division finite at the DC cell
                let k_length = (kx * kx + kz * kz).powf(0.5) + Vec4::splat(1e-7);

                let index = m * n + batch_start;
                let h0 = ComplexBatch::load(&self.initial.h0[index..index + 4]);
                let h0_conj = ComplexBatch::load(&self.initial.h0_conj[index..index + 4]);

                let omega = self.dispersion.frequencies(kx, kz);
                let vertical = self.dispersion.evolve(time_s, omega, h0, h0_conj);

                // Multiply by -i k-hat: moves surface points toward crests
                let horizontal_x = vertical * ComplexBatch::new(Vec4::ZERO, -kx / k_length);
                let horizontal_z = vertical * ComplexBatch::new(Vec4::ZERO, -kz / k_length);

                for i in 0..4 {
                    self.spectrum_vertical[index + i] = vertical.lane(i);
                    self.spectrum_horizontal_x[index + i] = horizontal_x.lane(i);
                    self.spectrum_horizontal_z[index + i] = horizontal_z.lane(i);
                }
            }
        }

        // Inverse 2D FFT on each grid
        Self::fft_2d(
            self.fft.as_ref(),
            &mut self.spectrum_vertical,
            &mut self.fft_scratch,
            &mut self.transpose_scratch,
            n,
        );
        Self::fft_2d(
            self.fft.as_ref(),
            &mut self.spectrum_horizontal_x,
            &mut self.fft_scratch,
            &mut self.transpose_scratch,
            n,
        );
        Self::fft_2d(
            self.fft.as_ref(),
            &mut self.spectrum_horizontal_z,
            &mut self.fft_scratch,
            &mut self.transpose_scratch,
            n,
        );

        // Combine real parts into the displacement image. The alternating
        // sign undoes the FFT shift left over from defining the spectrum
        // symmetric about the grid center instead of the origin.
        let lambda = self.config.choppiness;
        for m in 0..n {
            for col in 0..n {
                let index = m * n + col;
                let sign = if (col + m) & 1 == 0 { 1.0 } else { -1.0 };
                out[index] = Vec3::new(
                    finite_or_zero(self.spectrum_horizontal_x[index].re * sign * lambda),
                    finite_or_zero(self.spectrum_horizontal_z[index].re * sign * lambda),
                    finite_or_zero(self.spectrum_vertical[index].re * sign),
                );
            }
        }
    }

    /// In-place 2D complex FFT: rows, transpose, rows, transpose back.
    fn fft_2d(
        fft: &dyn Fft<f32>,
        buffer: &mut [Complex32],
        row_scratch: &mut [Complex32],
        transpose_scratch: &mut [Complex32],
        n: usize,
    ) {
        for row in buffer.chunks_exact_mut(n) {
            fft.process_with_scratch(row, row_scratch);
        }
        transpose(buffer, transpose_scratch, n);
        for row in buffer.chunks_exact_mut(n) {
            fft.process_with_scratch(row, row_scratch);
        }
        transpose(buffer, transpose_scratch, n);
    }
}

fn transpose(buffer: &mut [Complex32], scratch: &mut [Complex32], n: usize) {
    for row in 0..n {
        for col in 0..n {
            scratch[col * n + row] = buffer[row * n + col];
        }
    }
    buffer.copy_from_slice(scratch);
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
