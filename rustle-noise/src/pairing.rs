//! Integer pairing and hashing used to turn lattice coordinates into pool indices.
//!
//! The 2D pairings are bijections `ℕ² → ℕ` within the range where they do
//! not overflow; beyond it they wrap, which is harmless because callers only
//! use the result modulo a pool size. Inputs must be non-negative, so
//! negative lattice coordinates are folded through a consistent modulus
//! before they reach this module.

use serde::Deserialize;

/// Cantor pairing: `(x + y)(x + y + 1) / 2 + x`.
#[inline]
#[must_use]
pub fn cantor_pair(x: u64, y: u64) -> u64 {
    let sum = x.wrapping_add(y);
    // Halve whichever factor is even so the division stays exact after wrapping.
    let triangle = if sum % 2 == 0 {
        (sum / 2).wrapping_mul(sum.wrapping_add(1))
    } else {
        sum.wrapping_mul(sum.wrapping_add(1) / 2)
    };
    triangle.wrapping_add(x)
}

/// Szudzik pairing: `x ≥ y ? x² + x + y : y² + x`.
#[inline]
#[must_use]
pub fn szudzik_pair(x: u64, y: u64) -> u64 {
    if x >= y {
        x.wrapping_mul(x).wrapping_add(x).wrapping_add(y)
    } else {
        y.wrapping_mul(y).wrapping_add(x)
    }
}

/// Rosenberg-Strong pairing: `x < y ? y² + x : x² + 2x - y`.
#[inline]
#[must_use]
pub fn rosenberg_strong_pair(x: u64, y: u64) -> u64 {
    if x < y {
        y.wrapping_mul(y).wrapping_add(x)
    } else {
        x.wrapping_mul(x).wrapping_add(x.wrapping_mul(2)).wrapping_sub(y)
    }
}

/// Lossy 3D pairing: `((x·251) ^ (y·239) ^ (z·241)) · 4103`.
///
/// Not invertible; only suitable for spreading coordinates over a fixed-size pool.
#[inline]
#[must_use]
pub fn pair3d(x: u32, y: u32, z: u32) -> u32 {
    (x.wrapping_mul(251) ^ y.wrapping_mul(239) ^ z.wrapping_mul(241)).wrapping_mul(4103)
}

/// Avalanching integer hash built from shifts, XORs and two multiplies.
///
/// This is a bijection on `u32`.
#[inline]
#[must_use]
pub fn hash(value: u32) -> u32 {
    let mut x = value;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    x
}

/// Combines three per-axis permuted values into one hash.
#[inline]
#[must_use]
pub fn mix3(a: u32, b: u32, c: u32) -> u32 {
    hash(a ^ b.rotate_left(11) ^ c.rotate_left(22))
}

/// Folds a 64-bit pairing result into 32 bits.
#[inline]
#[must_use]
pub fn fold(value: u64) -> u32 {
    (value ^ (value >> 32)) as u32
}

/// The 2D pairing function used by hashed pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// [`cantor_pair`]
    Cantor,
    /// [`szudzik_pair`]
    Szudzik,
    /// [`rosenberg_strong_pair`]
    #[default]
    RosenbergStrong,
}

impl Pairing {
    /// Pairs `x` and `y` with the selected function.
    #[inline]
    #[must_use]
    pub fn pair(self, x: u64, y: u64) -> u64 {
        match self {
            Pairing::Cantor => cantor_pair(x, y),
            Pairing::Szudzik => szudzik_pair(x, y),
            Pairing::RosenbergStrong => rosenberg_strong_pair(x, y),
        }
    }
}
