//! Fixed-size pools of lattice values and gradients.
//!
//! A pool is drawn once from a random source when a noise function is
//! built and is read-only afterwards. Lattice strategies only decide which
//! entry a corner reads.

use std::{
    array,
    f64::consts::{FRAC_1_SQRT_2, TAU},
    sync::LazyLock,
};

use rustle_random::Random;

/// Number of entries in every pool.
pub const POOL_SIZE: usize = 256;

/// `1/√3`, the length of every 3D gradient.
const GRADIENT_3D_LENGTH: f64 = 0.577_350_269_189_625_8;

/// Eight evenly spaced directions scaled to length `1/√2`.
///
/// Dotting with an offset of length at most `√2` stays within `[-1, 1]`,
/// and the interpolated field stays within `[-0.5, 0.5]`.
pub static GRADIENTS_2D: LazyLock<[[f64; 2]; 8]> = LazyLock::new(|| {
    array::from_fn(|i| {
        let angle = TAU / 8.0 * i as f64;
        [angle.cos() * FRAC_1_SQRT_2, angle.sin() * FRAC_1_SQRT_2]
    })
});

/// An immutable pool of [`POOL_SIZE`] entries.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<T>,
}

impl<T: Copy> Pool<T> {
    fn draw<R: Random>(random: &mut R, mut entry: impl FnMut(&mut R) -> T) -> Self {
        let entries = (0..POOL_SIZE).map(|_| entry(random)).collect();
        Self { entries }
    }

    /// Returns the entry at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        self.entries[index % POOL_SIZE]
    }

    /// Returns every entry in draw order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

impl Pool<f64> {
    /// Scalars in `[0, 1)` for value noise.
    pub fn values(random: &mut impl Random) -> Self {
        let pool = Self::draw(random, Random::next_f64);
        log::debug!("Drew value pool of {POOL_SIZE} entries");
        pool
    }

    /// Slopes in `[-1, 1)` for 1D gradient noise.
    pub fn slopes(random: &mut impl Random) -> Self {
        let pool = Self::draw(random, |random| random.next_f64() * 2.0 - 1.0);
        log::debug!("Drew slope pool of {POOL_SIZE} entries");
        pool
    }
}

impl Pool<[f64; 2]> {
    /// Directions picked from [`GRADIENTS_2D`].
    pub fn gradients2d(random: &mut impl Random) -> Self {
        let pool = Self::draw(random, |random| GRADIENTS_2D[random.next_bounded(8)]);
        log::debug!("Drew 2d gradient pool of {POOL_SIZE} entries");
        pool
    }
}

impl Pool<[f64; 3]> {
    /// Directions sampled uniformly on the sphere and scaled to length `1/√3`.
    pub fn gradients3d(random: &mut impl Random) -> Self {
        let pool = Self::draw(random, |random| {
            let phi = random.next_f64() * TAU;
            let cos_theta = random.next_f64() * 2.0 - 1.0;
            let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
            [
                sin_theta * phi.cos() * GRADIENT_3D_LENGTH,
                sin_theta * phi.sin() * GRADIENT_3D_LENGTH,
                cos_theta * GRADIENT_3D_LENGTH,
            ]
        });
        log::debug!("Drew 3d gradient pool of {POOL_SIZE} entries");
        pool
    }
}
