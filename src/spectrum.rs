//! Wave-energy spectral density models.
//!
//! Both models map a grid cell `(n, m)` to an unnormalized spectral density
//! for the wavevector `k = pi * (2n - N, 2m - N) / W`. Indices may be
//! negative: the initial spectrum evaluates the conjugate partner at
//! `(-n, -m)`.
//!
//! Phillips follows Tessendorf's classic formulation; Bruenton follows the
//! unified directional spectrum of Elfouhaily et al. as used by Bruneton's
//! ocean rendering work.

use glam::Vec2;
use std::f32::consts::PI;

use crate::params::{OceanGeneratorConfig, SeaState, SpectrumModelKind};

/// Wavevector for grid cell `(n, m)` on an `N`-cell tile of size `W` meters.
pub fn wavevector(n: i32, m: i32, resolution: usize, world_size_m: f32) -> Vec2 {
    let normalized = normalized_coord(n, m, resolution);
    PI * normalized / world_size_m
}

fn normalized_coord(n: i32, m: i32, resolution: usize) -> Vec2 {
    let size = resolution as f32;
    Vec2::new(2.0 * n as f32 - size, 2.0 * m as f32 - size)
}

fn sqr(x: f32) -> f32 {
    x * x
}

/// Classic Phillips spectrum modulated by wind speed and direction.
#[derive(Debug, Clone)]
pub struct PhillipsSpectrum {
    resolution: usize,
    one_on_world_size: f32,
    gravity: f32,
    wind_velocity: Vec2,
    /// (min, max) band limit as fractions of the representable range
    normalized_frequency_range: Vec2,
    amplitude: f32,
}

impl PhillipsSpectrum {
    fn density(&self, n: i32, m: i32) -> f32 {
        let normalized = normalized_coord(n, m, self.resolution);
        let k = PI * normalized * self.one_on_world_size;

        let k_length = k.length();
        if k_length < 1e-6 {
            return 0.0;
        }

        // Band limit to the configured frequency window
        let normalized_length = normalized.length() * self.one_on_world_size;
        if normalized_length < self.normalized_frequency_range.x
            || normalized_length > self.normalized_frequency_range.y
        {
            return 0.0;
        }

        let wind_speed = self.wind_velocity.length();

        let k_len2 = k_length * k_length;
        let k_len4 = k_len2 * k_len2;

        // |k_hat . w_hat|^2 favors waves aligned with the wind
        let kw = sqr((k / k_length).dot(self.wind_velocity / wind_speed));

        // L^2 where L = U^2 / g is the largest wave from wind speed U
        let l_sq = sqr(wind_speed * wind_speed / self.gravity);

        self.amplitude * (-1.0 / (k_len2 * l_sq)).exp() / k_len4 * kw
    }
}

/// Unified directional spectrum: Pierson-Moskowitz style gravity waves plus
/// a capillary tail, with directional spreading.
///
/// Contributions from `k.x < 0` are folded into the `k.x >= 0` half grid by
/// doubling, exploiting the Hermitian symmetry of the real height field.
#[derive(Debug, Clone)]
pub struct BruentonSpectrum {
    resolution: usize,
    one_on_world_size: f32,
    gravity: f32,
    wind_velocity: Vec2,
    sea_state: SeaState,
}

impl BruentonSpectrum {
    /// Capillary-corrected deep water dispersion.
    fn omega(&self, k: f32) -> f32 {
        (self.gravity * k * (1.0 + sqr(k / self.sea_state.capillary_wavenumber))).sqrt()
    }

    fn density(&self, n: i32, m: i32) -> f32 {
        let normalized = normalized_coord(n, m, self.resolution);
        let k = PI * normalized * self.one_on_world_size;

        let k_length = k.length();
        if k_length < 1e-6 {
            return 0.0;
        }

        // Waves traveling against the wind fold into the forward half grid
        if k.x < 0.0 {
            return 0.0;
        }

        let u10 = self.wind_velocity.length();
        let omega_age = self.sea_state.inverse_wave_age;
        let cm = self.sea_state.capillary_phase_speed;
        let km = self.sea_state.capillary_wavenumber;

        // Phase speed at this wavenumber and at the spectral peak
        let c = self.omega(k_length) / k_length;
        let kp = self.gravity * sqr(omega_age / u10);
        let cp = self.omega(kp) / kp;

        // Friction velocity from the log-profile roughness length
        let z0 = 3.7e-5 * sqr(u10) / self.gravity * (u10 / cp).powf(0.9);
        let u_star = 0.41 * u10 / (10.0 / z0).ln();

        // Long-wave (gravity) component
        let lpm = (-5.0 / 4.0 * sqr(kp / k_length)).exp();
        let gamma = if omega_age < 1.0 {
            1.7
        } else {
            1.7 + 6.0 * omega_age.ln()
        };
        let sigma = 0.08 * (1.0 + 4.0 / omega_age.powi(3));
        let big_gamma =
            (-1.0 / (2.0 * sqr(sigma)) * sqr((k_length / kp).sqrt() - 1.0)).exp();
        let jp = gamma.powf(big_gamma);
        let fp = lpm * jp * (-omega_age / 10.0f32.sqrt() * ((k_length / kp).sqrt() - 1.0)).exp();
        let alpha_p = 0.006 * omega_age.sqrt();
        let mut bl = 0.5 * alpha_p * cp / c * fp;

        // Short-wave (capillary) component
        let alpha_m = 0.01
            * if u_star < cm {
                1.0 + (u_star / cm).ln()
            } else {
                1.0 + 3.0 * (u_star / cm).ln()
            };
        let fm = (-0.25 * sqr(k_length / km - 1.0)).exp();
        let mut bh = 0.5 * alpha_m * cm / c * fm * lpm;

        bl *= 2.0;
        bh *= 2.0;

        // Directional spreading
        let a0 = 2.0f32.ln() / 4.0;
        let ap = 4.0;
        let am = 0.13 * u_star / cm;
        let delta = (a0 + ap * (c / cp).powf(2.5) + am * (cm / c).powf(2.5)).tanh();
        let phi = k.y.atan2(k.x);

        self.sea_state.amplitude * (bl + bh) * (1.0 + delta * (2.0 * phi).cos())
            / (2.0 * PI * sqr(sqr(k_length)))
    }
}

/// Spectrum model selected by configuration.
#[derive(Debug, Clone)]
pub enum WaveSpectrum {
    Phillips(PhillipsSpectrum),
    Bruenton(BruentonSpectrum),
}

impl WaveSpectrum {
    pub fn from_config(config: &OceanGeneratorConfig) -> Self {
        let one_on_world_size = 1.0 / config.world_size_m;
        match config.spectrum_model {
            SpectrumModelKind::Phillips => Self::Phillips(PhillipsSpectrum {
                resolution: config.resolution,
                one_on_world_size,
                gravity: config.gravity,
                wind_velocity: config.wind_velocity,
                normalized_frequency_range: config.normalized_frequency_range,
                amplitude: config.sea_state.amplitude,
            }),
            SpectrumModelKind::Bruenton => Self::Bruenton(BruentonSpectrum {
                resolution: config.resolution,
                one_on_world_size,
                gravity: config.gravity,
                wind_velocity: config.wind_velocity,
                sea_state: config.sea_state.clone(),
            }),
        }
    }

    /// Spectral density at grid cell `(n, m)`.
    ///
    /// Never negative, NaN, or infinite: anomalous values would propagate
    /// through the inverse FFT to the entire image, so they clamp to zero
    /// here.
    pub fn density(&self, n: i32, m: i32) -> f32 {
        let raw = match self {
            Self::Phillips(model) => model.density(n, m),
            Self::Bruenton(model) => model.density(n, m),
        };
        if raw.is_finite() && raw > 0.0 {
            raw
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanGeneratorConfig;

    fn config(kind: SpectrumModelKind, wind_speed: f32) -> OceanGeneratorConfig {
        OceanGeneratorConfig {
            resolution: 64,
            world_size_m: 1000.0,
            wind_velocity: Vec2::new(wind_speed, 0.0),
            spectrum_model: kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_wavevector_center_is_dc() {
        let k = wavevector(32, 32, 64, 1000.0);
        assert_eq!(k, Vec2::ZERO);
    }

    #[test]
    fn test_dc_density_is_zero() {
        for kind in [SpectrumModelKind::Phillips, SpectrumModelKind::Bruenton] {
            let spectrum = WaveSpectrum::from_config(&config(kind, 10.0));
            assert_eq!(spectrum.density(32, 32), 0.0);
        }
    }

    #[test]
    fn test_density_finite_and_non_negative() {
        for kind in [SpectrumModelKind::Phillips, SpectrumModelKind::Bruenton] {
            let spectrum = WaveSpectrum::from_config(&config(kind, 10.0));
            for m in -64..128 {
                for n in -64..128 {
                    let d = spectrum.density(n, m);
                    assert!(d.is_finite(), "{kind:?} density({n}, {m}) not finite");
                    assert!(d >= 0.0, "{kind:?} density({n}, {m}) negative");
                }
            }
        }
    }

    #[test]
    fn test_phillips_decreases_with_wind_speed() {
        let full = WaveSpectrum::from_config(&config(SpectrumModelKind::Phillips, 10.0));
        let half = WaveSpectrum::from_config(&config(SpectrumModelKind::Phillips, 5.0));

        // Sample a mid-frequency cell downwind of DC
        let (n, m) = (40, 32);
        let d_full = full.density(n, m);
        let d_half = half.density(n, m);
        assert!(d_full > 0.0);
        assert!(d_half < d_full);
    }

    #[test]
    fn test_phillips_band_limit() {
        let mut cfg = config(SpectrumModelKind::Phillips, 10.0);
        cfg.normalized_frequency_range = Vec2::new(0.0, 0.02);
        let spectrum = WaveSpectrum::from_config(&cfg);

        // Far corner sits beyond the upper cutoff
        assert_eq!(spectrum.density(0, 0), 0.0);
    }

    #[test]
    fn test_bruenton_folds_negative_kx() {
        let spectrum = WaveSpectrum::from_config(&config(SpectrumModelKind::Bruenton, 10.0));

        // n < N/2 means k.x < 0, which folds to zero
        assert_eq!(spectrum.density(20, 40), 0.0);
        assert!(spectrum.density(44, 40) > 0.0);
    }

    #[test]
    fn test_phillips_favors_wind_aligned_waves() {
        let spectrum = WaveSpectrum::from_config(&config(SpectrumModelKind::Phillips, 10.0));

        // Same |k|: one cell downwind (along +x), one crosswind (along +z)
        let downwind = spectrum.density(40, 32);
        let crosswind = spectrum.density(32, 40);
        assert!(downwind > crosswind);
    }
}
