//! Static initial-condition spectrum for the wave field.
//!
//! `h0[n, m]` holds the wind-shaped gaussian amplitude for wavevector `k`,
//! `h0_conj[n, m]` the conjugated amplitude for `-k`. Both are immutable for
//! a fixed (wind, gravity, grid) tuple and rebuilt in full when the wind
//! changes, since every cell's density depends on the wind vector.

use rustfft::num_complex::Complex32;
use std::f32::consts::FRAC_1_SQRT_2;

use crate::random::NormalSource;
use crate::spectrum::WaveSpectrum;

#[derive(Debug, Clone)]
pub struct InitialSpectrum {
    pub h0: Vec<Complex32>,
    pub h0_conj: Vec<Complex32>,
    pub resolution: usize,
}

impl InitialSpectrum {
    /// Build the full `N x N` initial spectrum.
    ///
    /// Each cell consumes two independent complex gaussian draws: one for
    /// `h0` and one for the conjugate partner at `(-n, -m)`. The draw order
    /// (row-major, `h0` before `h0_conj` per cell) is part of the seeded
    /// reproducibility contract; reflecting a single draw instead would
    /// correlate the `k` and `-k` modes and change the sea state's
    /// statistical character.
    pub fn build(
        spectrum: &WaveSpectrum,
        source: &mut dyn NormalSource,
        resolution: usize,
        delta_k: f32,
    ) -> Self {
        let size = resolution * resolution;
        let mut h0 = vec![Complex32::new(0.0, 0.0); size];
        let mut h0_conj = vec![Complex32::new(0.0, 0.0); size];

        for m in 0..resolution {
            for n in 0..resolution {
                let index = m * resolution + n;

                let r = source.next_complex() * FRAC_1_SQRT_2;
                h0[index] = r * (spectrum.density(n as i32, m as i32) / 2.0).sqrt() * delta_k;

                let r_partner = source.next_complex() * FRAC_1_SQRT_2;
                h0_conj[index] = (r_partner
                    * (spectrum.density(-(n as i32), -(m as i32)) / 2.0).sqrt()
                    * delta_k)
                    .conj();
            }
        }

        Self {
            h0,
            h0_conj,
            resolution,
        }
    }
}
