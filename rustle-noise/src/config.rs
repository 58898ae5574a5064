//! Noise options and their normalisation into a build configuration.
//!
//! Options arrive from code or from a JSON5 document with every field
//! optional. [`NoiseOptions::normalize`] applies the defaults of one noise
//! family, rounds the domain sizes and rejects contradictory settings, so
//! evaluators never see a half-specified configuration.

use rustle_random::Seed;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    lattice::{Axis, Strategy},
    math::Blend,
    pairing::Pairing,
};

/// Axis size used when an option leaves it out.
pub const DEFAULT_DOMAIN_SIZE: u32 = 128;

/// An error raised while building a noise function.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Both memory modes were forced.
    #[error("force_low and force_high are mutually exclusive")]
    ConflictingMemoryModes,
    /// A dense table was forced over an axis that never wraps.
    #[error("A dense table cannot be built over an unbounded axis")]
    UnboundedDenseTable,
    /// A dense table was forced over a domain that is too large.
    #[error("A dense table of {cells} cells is too large")]
    DenseTableTooLarge {
        /// Cells the table would need, wrap planes included.
        cells: u64,
    },
    /// A power blend was given an exponent that does not map `0` to `0`.
    #[error("Power blend exponent must be finite and positive, got {power}")]
    InvalidBlendExponent {
        /// The rejected exponent.
        power: f64,
    },
    /// The options document could not be parsed.
    #[error("Failed to parse noise options: {0}")]
    Parse(#[from] serde_json5::Error),
}

/// Memory policy for the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    /// Pick by domain size.
    #[default]
    Auto,
    /// Prefer the smallest footprint.
    Low,
    /// Prefer the fastest lookup.
    High,
}

impl MemoryMode {
    /// Converts the two force flags into a mode.
    pub fn from_flags(force_low: bool, force_high: bool) -> Result<Self, ConfigError> {
        match (force_low, force_high) {
            (true, true) => Err(ConfigError::ConflictingMemoryModes),
            (true, false) => Ok(MemoryMode::Low),
            (false, true) => Ok(MemoryMode::High),
            (false, false) => Ok(MemoryMode::Auto),
        }
    }
}

/// Family defaults applied by [`NoiseOptions::normalize`].
#[derive(Debug, Clone, Copy)]
pub struct NoiseDefaults {
    /// Seed used when none is given.
    pub seed: i64,
    /// Blend used when none is given.
    pub blend: Blend,
}

/// Defaults of the gradient noise family.
pub const PERLIN_DEFAULTS: NoiseDefaults = NoiseDefaults {
    seed: 0x463D_1B05,
    blend: Blend::Quintic,
};

/// Defaults of the value noise family.
pub const VALUE_DEFAULTS: NoiseDefaults = NoiseDefaults {
    seed: 5_678_990,
    blend: Blend::Hermite,
};

/// User facing noise options. Every field is optional.
///
/// ```json5
/// {
///     seed: "terrain",
///     x_size: 64,
///     y_size: 0, // unbounded
///     blend: "heptic",
///     force_low: true,
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseOptions {
    /// Seed for the pool generator.
    pub seed: Option<Seed>,
    /// Wrap period along x. `0` means unbounded; fractions round up.
    pub x_size: Option<f64>,
    /// Wrap period along y.
    pub y_size: Option<f64>,
    /// Wrap period along z.
    pub z_size: Option<f64>,
    /// Blend kernel applied to the fractional offsets.
    pub blend: Option<Blend>,
    /// Pairing used by hashed 2D lattices.
    pub pairing: Option<Pairing>,
    /// Never build a dense table.
    pub force_low: bool,
    /// Always build a dense table.
    pub force_high: bool,
}

impl NoiseOptions {
    /// Parses options from a JSON5 document.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json5::from_str(source)?)
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Sets the x wrap period.
    #[must_use]
    pub fn with_x_size(mut self, size: f64) -> Self {
        self.x_size = Some(size);
        self
    }

    /// Sets the y wrap period.
    #[must_use]
    pub fn with_y_size(mut self, size: f64) -> Self {
        self.y_size = Some(size);
        self
    }

    /// Sets the z wrap period.
    #[must_use]
    pub fn with_z_size(mut self, size: f64) -> Self {
        self.z_size = Some(size);
        self
    }

    /// Sets the blend kernel.
    #[must_use]
    pub fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = Some(blend);
        self
    }

    /// Resolves the options for a noise of `dimensions` axes.
    ///
    /// Sizes of axes beyond `dimensions` are ignored.
    pub fn normalize(
        &self,
        dimensions: usize,
        defaults: NoiseDefaults,
    ) -> Result<NoiseConfig, ConfigError> {
        let mode = MemoryMode::from_flags(self.force_low, self.force_high)?;

        let sizes = [self.x_size, self.y_size, self.z_size];
        let mut axes = [Axis::new(1); 3];
        for (axis, size) in axes.iter_mut().zip(sizes).take(dimensions) {
            *axis = Axis::new(normalize_size(size));
        }

        let blend = self.blend.unwrap_or(defaults.blend);
        if let Blend::Power(power) = blend
            && (!power.is_finite() || power <= 0.0)
        {
            return Err(ConfigError::InvalidBlendExponent { power });
        }

        let strategy = Strategy::select(&axes[..dimensions], mode)?;

        let seed = self.seed.clone().unwrap_or(Seed::Int(defaults.seed));
        log::trace!("Resolved noise seed {seed}");

        Ok(NoiseConfig {
            seed,
            blend,
            pairing: self.pairing.unwrap_or_default(),
            mode,
            strategy,
            axes,
            dimensions,
        })
    }
}

/// Rounds a size up and clamps it into `u32`. `NaN` and negatives become `0`.
fn normalize_size(size: Option<f64>) -> u32 {
    size.map_or(DEFAULT_DOMAIN_SIZE, |size| size.ceil() as u32)
}

/// Fully resolved options for one noise function.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Seed for the pool generator.
    pub seed: Seed,
    /// Blend kernel.
    pub blend: Blend,
    /// Pairing used by hashed 2D lattices.
    pub pairing: Pairing,
    /// Requested memory policy.
    pub mode: MemoryMode,
    /// Lattice strategy chosen for the policy.
    pub strategy: Strategy,
    axes: [Axis; 3],
    dimensions: usize,
}

impl NoiseConfig {
    /// The used axes, in `x, y, z` order.
    #[must_use]
    pub fn axes(&self) -> &[Axis] {
        &self.axes[..self.dimensions]
    }

    /// Axis `n`, or a size-one axis when `n` is not used.
    #[must_use]
    pub fn axis(&self, n: usize) -> Axis {
        self.axes[n]
    }
}
