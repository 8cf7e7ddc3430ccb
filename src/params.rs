//! Parameter definitions with physical units and documented semantics.

use glam::Vec2;

use crate::error::ConfigError;

/// Which directional wave spectrum drives the initial conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumModelKind {
    /// Classic Phillips spectrum (Tessendorf eq. 23), band-limited.
    Phillips,
    /// Unified directional spectrum after Bruneton/Elfouhaily, with a
    /// Pierson-Moskowitz gravity-wave component and a capillary tail.
    #[default]
    Bruenton,
}

/// Which gaussian source seeds the initial spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseSourceKind {
    /// Sequential draws from a seeded `StdRng`
    #[default]
    Seeded,
    /// Coordinate-hash draws, reproducible independent of draw order
    Hash,
}

/// Empirical sea-state shape parameters for the spectrum models.
///
/// These were process-wide tuning globals in older FFT ocean codes; carrying
/// them in the config keeps each generator independently tunable.
#[derive(Debug, Clone)]
pub struct SeaState {
    /// Inverse wave age Omega (dimensionless). 0.84 is a fully developed sea.
    pub inverse_wave_age: f32,

    /// Phase speed at the gravity-capillary transition (m/s)
    pub capillary_phase_speed: f32,

    /// Wavenumber of the gravity-capillary transition (rad/m)
    pub capillary_wavenumber: f32,

    /// Overall spectral amplitude multiplier (dimensionless)
    pub amplitude: f32,
}

impl Default for SeaState {
    fn default() -> Self {
        Self {
            inverse_wave_age: 0.84,
            capillary_phase_speed: 0.23,
            capillary_wavenumber: 370.0,
            amplitude: 1.0,
        }
    }
}

/// Ocean displacement generator configuration.
#[derive(Debug, Clone)]
pub struct OceanGeneratorConfig {
    /// Grid resolution per side (power of two, e.g. 256-512)
    pub resolution: usize,

    /// World-space size of one periodic tile (meters)
    pub world_size_m: f32,

    /// Gravitational acceleration (m/s^2)
    pub gravity: f32,

    /// Wind velocity over the tile in the XZ plane (m/s)
    pub wind_velocity: Vec2,

    /// Seed for the gaussian draws behind the initial spectrum
    pub seed: u64,

    /// Gaussian source feeding the initial spectrum
    pub noise_source: NoiseSourceKind,

    /// Spectrum model selection
    pub spectrum_model: SpectrumModelKind,

    /// Band limit as (min, max) fractions of the representable frequency
    /// range, each in [0, 1]. Applies to the Phillips model.
    pub normalized_frequency_range: Vec2,

    /// Horizontal displacement multiplier lambda (sharpens wave crests).
    /// Empirically tuned visual parameter, not derived from first principles.
    pub choppiness: f32,

    /// Period (seconds) at which the quantized dispersion relation loops,
    /// so the field tiles seamlessly in time as well as space
    pub dispersion_loop_period_s: f32,

    /// Empirical sea-state shape parameters
    pub sea_state: SeaState,
}

impl Default for OceanGeneratorConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            world_size_m: 1000.0,
            gravity: 9.8,
            wind_velocity: Vec2::new(10.0, 0.0),
            seed: 0,
            noise_source: NoiseSourceKind::default(),
            spectrum_model: SpectrumModelKind::default(),
            normalized_frequency_range: Vec2::new(0.0, 1.0),
            choppiness: 8.0,
            dispersion_loop_period_s: 200.0,
            sea_state: SeaState::default(),
        }
    }
}

impl OceanGeneratorConfig {
    /// Validate configuration (resolution must be a power of two, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resolution.is_power_of_two() || self.resolution < 4 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if !(self.world_size_m.is_finite() && self.world_size_m > 0.0) {
            return Err(ConfigError::InvalidWorldSize(self.world_size_m));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if self.wind_velocity.length_squared() == 0.0 {
            return Err(ConfigError::ZeroWindSpeed);
        }
        let range = self.normalized_frequency_range;
        if !(range.x >= 0.0 && range.x <= range.y) {
            return Err(ConfigError::InvalidFrequencyRange(range.x, range.y));
        }
        if !(self.dispersion_loop_period_s.is_finite() && self.dispersion_loop_period_s > 0.0) {
            return Err(ConfigError::InvalidDispersionPeriod(
                self.dispersion_loop_period_s,
            ));
        }
        Ok(())
    }

    /// Wavevector spacing between adjacent grid cells (rad/m)
    pub fn delta_k(&self) -> f32 {
        2.0 * std::f32::consts::PI / self.world_size_m
    }
}

/// Largest expected wave height for a given wind speed (meters).
///
/// This is the Phillips largest-wave parameter `L = U^2 / g`.
pub fn max_wave_height(wind_speed: f32, gravity: f32) -> f32 {
    wind_speed * wind_speed / gravity
}

/// Wind speed that produces a given maximum wave height (m/s).
pub fn wind_speed_from_max_wave_height(max_wave_height: f32, gravity: f32) -> f32 {
    (max_wave_height * gravity).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OceanGeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolution_must_be_power_of_two() {
        let config = OceanGeneratorConfig {
            resolution: 100,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidResolution(100))
        ));
    }

    #[test]
    fn test_tiny_resolution_rejected() {
        let config = OceanGeneratorConfig {
            resolution: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_world_size_must_be_positive() {
        let config = OceanGeneratorConfig {
            world_size_m: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize(_))
        ));
    }

    #[test]
    fn test_zero_wind_rejected() {
        let config = OceanGeneratorConfig {
            wind_velocity: Vec2::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWindSpeed)));
    }

    #[test]
    fn test_wave_height_round_trip() {
        let gravity = 9.8;
        let height = max_wave_height(10.0, gravity);
        assert!((height - 100.0 / 9.8).abs() < 1e-5);
        assert!((wind_speed_from_max_wave_height(height, gravity) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_delta_k() {
        let config = OceanGeneratorConfig {
            world_size_m: 1000.0,
            ..Default::default()
        };
        assert!((config.delta_k() - 2.0 * std::f32::consts::PI / 1000.0).abs() < 1e-9);
    }
}
