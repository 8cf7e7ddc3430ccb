//! Batched dispersion relation and time evolution of the spectrum.
//!
//! Wavevectors are processed four at a time in `glam::Vec4` lanes; the grid
//! resolution is a power of two of at least 4, so rows always divide evenly
//! into batches.

use glam::Vec4;
use rustfft::num_complex::Complex32;
use std::f32::consts::PI;
use std::ops::{Add, Mul};

/// Four complex values in structure-of-arrays lanes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexBatch {
    pub re: Vec4,
    pub im: Vec4,
}

impl ComplexBatch {
    pub fn new(re: Vec4, im: Vec4) -> Self {
        Self { re, im }
    }

    /// Load four consecutive samples. Callers guarantee `values.len() >= 4`.
    pub fn load(values: &[Complex32]) -> Self {
        Self {
            re: Vec4::new(values[0].re, values[1].re, values[2].re, values[3].re),
            im: Vec4::new(values[0].im, values[1].im, values[2].im, values[3].im),
        }
    }

    pub fn lane(&self, i: usize) -> Complex32 {
        Complex32::new(self.re[i], self.im[i])
    }
}

impl Mul for ComplexBatch {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Add for ComplexBatch {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

fn sin_cos(v: Vec4) -> (Vec4, Vec4) {
    (
        Vec4::new(v.x.sin(), v.y.sin(), v.z.sin(), v.w.sin()),
        Vec4::new(v.x.cos(), v.y.cos(), v.z.cos(), v.w.cos()),
    )
}

/// Quantized deep-water dispersion relation.
#[derive(Debug, Clone)]
pub struct DispersionEvaluator {
    gravity: f32,
    /// Base frequency the dispersion is quantized to (rad/s)
    loop_frequency: f32,
}

impl DispersionEvaluator {
    pub fn new(gravity: f32, loop_period_s: f32) -> Self {
        Self {
            gravity,
            loop_frequency: 2.0 * PI / loop_period_s,
        }
    }

    /// Oscillation frequencies for four wavevectors.
    ///
    /// `omega = floor(sqrt(g |k|) / w0) * w0`: quantizing to multiples of the
    /// loop frequency makes every mode periodic over the loop period, so the
    /// animation repeats without a seam.
    pub fn frequencies(&self, kx: Vec4, kz: Vec4) -> Vec4 {
        let k_length = (kx * kx + kz * kz).powf(0.5);
        ((k_length * self.gravity).powf(0.5) / self.loop_frequency).floor() * self.loop_frequency
    }

    /// Time-evolve four cells: `h(k, t) = h0 e^{i w t} + h0*(-k) e^{-i w t}`.
    ///
    /// The complex exponentials expand through Euler's formula, so the pair
    /// shares one sin/cos evaluation per lane.
    pub fn evolve(
        &self,
        time_s: f32,
        omega: Vec4,
        h0: ComplexBatch,
        h0_conj: ComplexBatch,
    ) -> ComplexBatch {
        let omega_t = omega * time_s;
        let (sin, cos) = sin_cos(omega_t);
        h0 * ComplexBatch::new(cos, sin) + h0_conj * ComplexBatch::new(cos, -sin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequencies_quantized_to_loop_frequency() {
        let evaluator = DispersionEvaluator::new(9.8, 200.0);
        let w0 = 2.0 * PI / 200.0;

        let kx = Vec4::new(0.01, 0.1, 0.5, 2.0);
        let kz = Vec4::new(0.02, 0.0, 0.25, 1.0);
        let omega = evaluator.frequencies(kx, kz);

        for i in 0..4 {
            let steps = omega[i] / w0;
            assert!((steps - steps.round()).abs() < 1e-3, "lane {i} not quantized");
        }
    }

    #[test]
    fn test_zero_wavevector_frequency_is_zero() {
        let evaluator = DispersionEvaluator::new(9.8, 200.0);
        let omega = evaluator.frequencies(Vec4::ZERO, Vec4::ZERO);
        assert_eq!(omega, Vec4::ZERO);
    }

    #[test]
    fn test_evolve_at_time_zero_is_sum() {
        let evaluator = DispersionEvaluator::new(9.8, 200.0);
        let h0 = ComplexBatch::new(Vec4::new(1.0, 2.0, 3.0, 4.0), Vec4::splat(0.5));
        let h0_conj = ComplexBatch::new(Vec4::splat(-1.0), Vec4::new(0.1, 0.2, 0.3, 0.4));
        let omega = Vec4::new(0.5, 1.0, 1.5, 2.0);

        let evolved = evaluator.evolve(0.0, omega, h0, h0_conj);
        assert_eq!(evolved, h0 + h0_conj);
    }

    #[test]
    fn test_conjugate_pair_evolves_real() {
        // h0_conj = conj(h0) keeps h(t) = 2 Re(h0 e^{iwt}) real for all t
        let evaluator = DispersionEvaluator::new(9.8, 200.0);
        let h0 = ComplexBatch::new(Vec4::new(0.3, -0.7, 1.1, 0.0), Vec4::new(0.9, 0.2, -0.4, 1.0));
        let h0_conj = ComplexBatch::new(h0.re, -h0.im);
        let omega = Vec4::new(0.1, 0.7, 1.3, 2.9);

        for step in 0..16 {
            let t = step as f32 * 0.37;
            let evolved = evaluator.evolve(t, omega, h0, h0_conj);
            for i in 0..4 {
                assert!(evolved.im[i].abs() < 1e-5, "lane {i} not real at t={t}");
            }
        }
    }

    #[test]
    fn test_batch_multiply_matches_scalar() {
        let a = ComplexBatch::new(Vec4::new(1.0, 2.0, 3.0, 4.0), Vec4::new(-1.0, 0.5, 0.0, 2.0));
        let b = ComplexBatch::new(Vec4::new(0.5, -1.0, 2.0, 1.0), Vec4::new(1.0, 1.0, -2.0, 0.0));

        let product = a * b;
        for i in 0..4 {
            let expected = a.lane(i) * b.lane(i);
            assert!((product.lane(i) - expected).norm() < 1e-6);
        }
    }
}
