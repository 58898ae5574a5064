//! Gradient (Perlin) noise.
//!
//! Each lattice corner carries a gradient; a sample is the blended sum of
//! the gradients dotted with the offsets from their corners. Gradient
//! lengths are chosen so the raw field stays within `[-0.5, 0.5]`, which is
//! then shifted into `[0, 1)`.

// Noise code uses mathematical single-letter variables (x, y, z)
#![allow(clippy::many_single_char_names)]

use rustle_random::{Random, RandomSource};

use crate::{
    Noise1d, Noise2d, Noise3d, clamp_output,
    config::{ConfigError, NoiseConfig, NoiseOptions, PERLIN_DEFAULTS},
    lattice::{Axis, LatticeIndex, Permutation},
    log_seed_overridden,
    math::{Blend, bilerp, dot2, dot3, lerp, trilerp},
    pool::Pool,
};

/// Shifts a raw gradient sum from `[-0.5, 0.5]` into the public range.
#[inline]
fn shift(raw: f64) -> f64 {
    clamp_output(raw + 0.5)
}

/// One-dimensional gradient noise.
///
/// Corners carry slopes in `[-1, 1)`, so the field passes through `0.5` at
/// every lattice point.
#[derive(Debug, Clone)]
pub struct PerlinNoise1d {
    pool: Pool<f64>,
    lattice: Permutation,
    blend: Blend,
    x_axis: Axis,
}

impl PerlinNoise1d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(1, PERLIN_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(1, PERLIN_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        let pool = Pool::slopes(random);
        let lattice = Permutation::build(config.strategy, config.axes(), config.pairing, random);
        Self {
            pool,
            lattice,
            blend: config.blend,
            x_axis: config.axis(0),
        }
    }

    /// Samples the noise at `x`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let g0 = self.pool.get(self.lattice.index(x0, 0, 0));
        let g1 = self.pool.get(self.lattice.index(x1, 0, 0));
        shift(lerp(self.blend.apply(dx), g0 * dx, g1 * (dx - 1.0)))
    }
}

impl Noise1d for PerlinNoise1d {
    fn sample(&self, x: f64) -> f64 {
        PerlinNoise1d::sample(self, x)
    }
}

/// Two-dimensional gradient noise over eight evenly spaced directions.
#[derive(Debug, Clone)]
pub struct PerlinNoise2d {
    pool: Pool<[f64; 2]>,
    lattice: Permutation,
    blend: Blend,
    x_axis: Axis,
    y_axis: Axis,
}

impl PerlinNoise2d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(2, PERLIN_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(2, PERLIN_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        let pool = Pool::gradients2d(random);
        let lattice = Permutation::build(config.strategy, config.axes(), config.pairing, random);
        Self {
            pool,
            lattice,
            blend: config.blend,
            x_axis: config.axis(0),
            y_axis: config.axis(1),
        }
    }

    #[inline]
    fn gradient(&self, x: u32, y: u32) -> [f64; 2] {
        self.pool.get(self.lattice.index(x, y, 0))
    }

    /// Samples the noise at `(x, y)`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let (y0, y1, dy) = self.y_axis.cell(y);

        let n00 = dot2(self.gradient(x0, y0), dx, dy);
        let n10 = dot2(self.gradient(x1, y0), dx - 1.0, dy);
        let n01 = dot2(self.gradient(x0, y1), dx, dy - 1.0);
        let n11 = dot2(self.gradient(x1, y1), dx - 1.0, dy - 1.0);

        shift(bilerp(
            self.blend.apply(dx),
            self.blend.apply(dy),
            n00,
            n10,
            n01,
            n11,
        ))
    }
}

impl Noise2d for PerlinNoise2d {
    fn sample(&self, x: f64, y: f64) -> f64 {
        PerlinNoise2d::sample(self, x, y)
    }
}

/// Three-dimensional gradient noise over directions sampled on the sphere.
#[derive(Debug, Clone)]
pub struct PerlinNoise3d {
    pool: Pool<[f64; 3]>,
    lattice: Permutation,
    blend: Blend,
    x_axis: Axis,
    y_axis: Axis,
    z_axis: Axis,
}

impl PerlinNoise3d {
    /// Builds the noise from `options`, seeding Alea from the option seed or the default.
    pub fn new(options: &NoiseOptions) -> Result<Self, ConfigError> {
        let config = options.normalize(3, PERLIN_DEFAULTS)?;
        Ok(Self::build(&config, &mut RandomSource::alea(&config.seed)))
    }

    /// Builds the noise drawing its pool from `random`. Any seed in `options` is ignored.
    pub fn with_random(
        options: &NoiseOptions,
        random: &mut impl Random,
    ) -> Result<Self, ConfigError> {
        let config = options.normalize(3, PERLIN_DEFAULTS)?;
        log_seed_overridden(options);
        Ok(Self::build(&config, random))
    }

    fn build(config: &NoiseConfig, random: &mut impl Random) -> Self {
        let pool = Pool::gradients3d(random);
        let lattice = Permutation::build(config.strategy, config.axes(), config.pairing, random);
        Self {
            pool,
            lattice,
            blend: config.blend,
            x_axis: config.axis(0),
            y_axis: config.axis(1),
            z_axis: config.axis(2),
        }
    }

    #[inline]
    fn gradient(&self, x: u32, y: u32, z: u32) -> [f64; 3] {
        self.pool.get(self.lattice.index(x, y, z))
    }

    /// Samples the noise at `(x, y, z)`. The result lies in `[0, 1)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x0, x1, dx) = self.x_axis.cell(x);
        let (y0, y1, dy) = self.y_axis.cell(y);
        let (z0, z1, dz) = self.z_axis.cell(z);

        let n000 = dot3(self.gradient(x0, y0, z0), dx, dy, dz);
        let n100 = dot3(self.gradient(x1, y0, z0), dx - 1.0, dy, dz);
        let n010 = dot3(self.gradient(x0, y1, z0), dx, dy - 1.0, dz);
        let n110 = dot3(self.gradient(x1, y1, z0), dx - 1.0, dy - 1.0, dz);
        let n001 = dot3(self.gradient(x0, y0, z1), dx, dy, dz - 1.0);
        let n101 = dot3(self.gradient(x1, y0, z1), dx - 1.0, dy, dz - 1.0);
        let n011 = dot3(self.gradient(x0, y1, z1), dx, dy - 1.0, dz - 1.0);
        let n111 = dot3(self.gradient(x1, y1, z1), dx - 1.0, dy - 1.0, dz - 1.0);

        shift(trilerp(
            self.blend.apply(dx),
            self.blend.apply(dy),
            self.blend.apply(dz),
            n000,
            n100,
            n010,
            n110,
            n001,
            n101,
            n011,
            n111,
        ))
    }
}

impl Noise3d for PerlinNoise3d {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        PerlinNoise3d::sample(self, x, y, z)
    }
}
