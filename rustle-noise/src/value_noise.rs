//! Value noise: random scalars at lattice points, blended across each cell.

// Noise code uses mathematical single-letter variables (x, y, z)
#![allow(clippy::many_single_char_names)]

use rustle_random::{Random, RandomSource};

use crate::{
    Noise1d, Noise2d, Noise3d, clamp_output,
    config::{ConfigError, NoiseConfig, NoiseOptions, VALUE_DEFAULTS},
    lattice::{Axis, LatticeIndex, Permutation},
    log_seed_overridden,
    math::{Blend, bilerp, lerp, trilerp},
    pool::Pool,
};

/// Shared state of the value noise evaluators.
#[derive(Debug, Clone)]
struct ValueLattice {
    pool: Pool<f64>,
    lattice: Permutation,
    blend: Blend,
}

impl ValueLattice {
    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        let pool = Pool::values(random);
        let lattice = Permutation::build(config.strategy, config.axes(), config.pairing, random);
        Self {
            pool,
            lattice,
            blend: config.blend,
        }
    }

    #[inline]
    fn corner(&self, x: u32, y: u32, z: u32) -> f64 {
        self.pool.get(self.lattice.index(x, y, z))
    }
}

/// One-dimensional value noise.
#[derive(Debug, Clone)]
pub struct ValueNoise1d {
    inner: ValueLattice,
    x_axis: Axis,
}

impl ValueNoise1d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(1, VALUE_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(1, VALUE_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        Self {
            inner: ValueLattice::build(config, random),
            x_axis: config.axis(0),
        }
    }

    /// Samples the noise at `x`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let inner = &self.inner;
        clamp_output(lerp(
            inner.blend.apply(dx),
            inner.corner(x0, 0, 0),
            inner.corner(x1, 0, 0),
        ))
    }
}

impl Noise1d for ValueNoise1d {
    fn sample(&self, x: f64) -> f64 {
        ValueNoise1d::sample(self, x)
    }
}

/// Two-dimensional value noise.
#[derive(Debug, Clone)]
pub struct ValueNoise2d {
    inner: ValueLattice,
    x_axis: Axis,
    y_axis: Axis,
}

impl ValueNoise2d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(2, VALUE_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(2, VALUE_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        Self {
            inner: ValueLattice::build(config, random),
            x_axis: config.axis(0),
            y_axis: config.axis(1),
        }
    }

    /// Samples the noise at `(x, y)`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let (y0, y1, dy) = self.y_axis.cell(y);
        let inner = &self.inner;
        clamp_output(bilerp(
            inner.blend.apply(dx),
            inner.blend.apply(dy),
            inner.corner(x0, y0, 0),
            inner.corner(x1, y0, 0),
            inner.corner(x0, y1, 0),
            inner.corner(x1, y1, 0),
        ))
    }
}

impl Noise2d for ValueNoise2d {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ValueNoise2d::sample(self, x, y)
    }
}

/// Three-dimensional value noise.
#[derive(Debug, Clone)]
pub struct ValueNoise3d {
    inner: ValueLattice,
    x_axis: Axis,
    y_axis: Axis,
    z_axis: Axis,
}

impl ValueNoise3d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(3, VALUE_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(3, VALUE_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        Self {
            inner: ValueLattice::build(config, random),
            x_axis: config.axis(0),
            y_axis: config.axis(1),
            z_axis: config.axis(2),
        }
    }

    /// Samples the noise at `(x, y, z)`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let (y0, y1, dy) = self.y_axis.cell(y);
        let (z0, z1, dz) = self.z_axis.cell(z);
        let inner = &self.inner;
        let blend = inner.blend;
        clamp_output(trilerp(
            blend.apply(dx),
            blend.apply(dy),
            blend.apply(dz),
            inner.corner(x0, y0, z0),
            inner.corner(x1, y0, z0),
            inner.corner(x0, y1, z0),
            inner.corner(x1, y1, z0),
            inner.corner(x0, y0, z1),
            inner.corner(x1, y0, z1),
            inner.corner(x0, y1, z1),
            inner.corner(x1, y1, z1),
        ))
    }
}

impl Noise3d for ValueNoise3d {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        ValueNoise3d::sample(self, x, y, z)
    }
}
