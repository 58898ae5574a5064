//! # Rustle Noise
//!
//! Deterministic, seedable value and gradient noise in one, two and three
//! dimensions.
//!
//! A noise function is built once from [`NoiseOptions`]: the seed (or an
//! explicit random source) fills a fixed pool of lattice values, and the
//! domain sizes pick how lattice corners index that pool. After
//! construction every evaluator is immutable, so it can be shared across
//! threads and sampled without further randomness.
//!
//! ```
//! use rustle_noise::{NoiseOptions, PerlinNoise2d};
//!
//! let noise = PerlinNoise2d::new(&NoiseOptions::default().with_seed("hills"))?;
//! let height = noise.sample(12.25, 7.5);
//! assert!((0.0..1.0).contains(&height));
//! # Ok::<(), rustle_noise::ConfigError>(())
//! ```

pub mod config;
pub mod grid;
pub mod lattice;
pub mod math;
pub mod pairing;
pub mod perlin_noise;
pub mod pool;
pub mod value_noise;

pub use config::{ConfigError, MemoryMode, NoiseConfig, NoiseOptions};
pub use grid::{flat_grid, range};
pub use math::Blend;
pub use pairing::Pairing;
pub use perlin_noise::{PerlinNoise1d, PerlinNoise2d, PerlinNoise3d};
pub use value_noise::{ValueNoise1d, ValueNoise2d, ValueNoise3d};

/// Largest value any evaluator returns: the double just below `1`.
pub const MAX_NOISE_VALUE: f64 = 1.0 - f64::EPSILON;

/// Clamps an evaluator result into `[0, MAX_NOISE_VALUE]`. `NaN` passes through.
#[inline]
pub(crate) fn clamp_output(value: f64) -> f64 {
    value.clamp(0.0, MAX_NOISE_VALUE)
}

/// Notes that an explicit random source replaces the configured seed.
pub(crate) fn log_seed_overridden(options: &NoiseOptions) {
    if let Some(seed) = &options.seed {
        log::debug!("Explicit random source overrides seed {seed}");
    }
}

/// A one-dimensional noise field.
pub trait Noise1d: Send + Sync {
    /// Samples the field at `x`. The result lies in `[0, 1)`.
    fn sample(&self, x: f64) -> f64;
}

/// A two-dimensional noise field.
pub trait Noise2d: Send + Sync {
    /// Samples the field at `(x, y)`. The result lies in `[0, 1)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// A three-dimensional noise field.
pub trait Noise3d: Send + Sync {
    /// Samples the field at `(x, y, z)`. The result lies in `[0, 1)`.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}
