//! Blend kernels and interpolation helpers for noise evaluation.
//!
//! Every kernel maps `[0, 1]` onto `[0, 1]`, is monotonic and satisfies
//! `f(0) = 0` and `f(1) = 1`.

use std::f64::consts::PI;

use serde::Deserialize;

/// Identity blend: `t`.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Hermite blend.
/// Formula: t²(3 - 2t)
#[inline]
#[must_use]
pub fn hermite(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic blend, zero first and second derivative at both ends.
/// Formula: t³(10 + t(-15 + 6t))
#[inline]
#[must_use]
pub fn quintic(t: f64) -> f64 {
    t * t * t * (10.0 + t * (-15.0 + t * 6.0))
}

/// Heptic blend.
/// Formula: 4g⁵ - 3g⁴ where g = 1 - (1 - t)² / 4
#[inline]
#[must_use]
pub fn heptic(t: f64) -> f64 {
    let inverse = 1.0 - t;
    let g = 1.0 - inverse * inverse / 4.0;
    let g4 = g * g * g * g;
    4.0 * g4 * g - 3.0 * g4
}

/// Trigonometric blend.
/// Formula: (sin((t - 0.5)π) + 1) / 2
#[inline]
#[must_use]
pub fn trigonometric(t: f64) -> f64 {
    (((t - 0.5) * PI).sin() + 1.0) / 2.0
}

/// Returns the power ease `t^power`.
///
/// Only a finite positive `power` keeps `f(0) = 0` and `f(1) = 1`.
#[must_use]
pub fn power_ease(power: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| t.powf(power)
}

/// A blend kernel selectable at configuration time.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blend {
    /// [`linear`]
    Linear,
    /// [`hermite`]
    Hermite,
    /// [`quintic`]
    #[default]
    Quintic,
    /// [`heptic`]
    Heptic,
    /// [`trigonometric`]
    Trigonometric,
    /// [`power_ease`] with the given exponent, which must be finite and positive.
    Power(f64),
    /// Any caller supplied kernel.
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Blend {
    /// Applies the kernel to `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Blend::Linear => linear(t),
            Blend::Hermite => hermite(t),
            Blend::Quintic => quintic(t),
            Blend::Heptic => heptic(t),
            Blend::Trigonometric => trigonometric(t),
            Blend::Power(power) => t.powf(power),
            Blend::Custom(kernel) => kernel(t),
        }
    }
}

/// Straight-line blend from `start` (at `delta = 0`) to `end` (at `delta = 1`).
/// Formula: start(1 - delta) + end·delta
#[inline]
#[must_use]
pub fn lerp(delta: f64, start: f64, end: f64) -> f64 {
    start * (1.0 - delta) + end * delta
}

/// Linear interpolation with `blend` applied to `delta` first.
#[inline]
#[must_use]
pub fn interpolate(delta: f64, start: f64, end: f64, blend: Blend) -> f64 {
    lerp(blend.apply(delta), start, end)
}

/// Bilinear interpolation.
#[inline]
#[must_use]
pub fn bilerp(delta1: f64, delta2: f64, v00: f64, v10: f64, v01: f64, v11: f64) -> f64 {
    lerp(delta2, lerp(delta1, v00, v10), lerp(delta1, v01, v11))
}

/// Trilinear interpolation.
#[allow(clippy::too_many_arguments)] // three deltas plus eight corners
#[inline]
#[must_use]
pub fn trilerp(
    delta1: f64,
    delta2: f64,
    delta3: f64,
    v000: f64,
    v100: f64,
    v010: f64,
    v110: f64,
    v001: f64,
    v101: f64,
    v011: f64,
    v111: f64,
) -> f64 {
    lerp(
        delta3,
        bilerp(delta1, delta2, v000, v100, v010, v110),
        bilerp(delta1, delta2, v001, v101, v011, v111),
    )
}

/// Quadrilinear interpolation.
///
/// Corners are indexed `x + 2y + 4z + 8w`, so `corners[0b0101]` is `v1010`
/// in `xyzw` order.
#[inline]
#[must_use]
pub fn quadrilerp(deltas: [f64; 4], corners: &[f64; 16]) -> f64 {
    let [dx, dy, dz, dw] = deltas;
    let low = trilerp(
        dx, dy, dz, corners[0], corners[1], corners[2], corners[3], corners[4], corners[5],
        corners[6], corners[7],
    );
    let high = trilerp(
        dx, dy, dz, corners[8], corners[9], corners[10], corners[11], corners[12], corners[13],
        corners[14], corners[15],
    );
    lerp(dw, low, high)
}

/// Floor function returning i64.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i64 {
    let i = value as i64;
    if value < i as f64 { i - 1 } else { i }
}

/// Modulus whose result always lies in `[0, divisor)`, including for negative values.
#[inline]
#[must_use]
pub fn consistent_modulus(value: i64, divisor: i64) -> i64 {
    ((value % divisor) + divisor) % divisor
}

/// 2D dot product.
#[inline]
#[must_use]
pub fn dot2(a: [f64; 2], x: f64, y: f64) -> f64 {
    a[0] * x + a[1] * y
}

/// 3D dot product.
#[inline]
#[must_use]
pub fn dot3(a: [f64; 3], x: f64, y: f64, z: f64) -> f64 {
    a[0] * x + a[1] * y + a[2] * z
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

    fn assert_table(kernel: impl Fn(f64) -> f64, expected: &[f64; 11], tolerance: f64) {
        for (t, want) in STEPS.iter().zip(expected) {
            let got = kernel(*t);
            assert!((got - want).abs() < tolerance, "f({t}) = {got}, expected {want}");
        }
    }

    #[test]
    fn test_linear() {
        for t in STEPS {
            assert_eq!(linear(t).to_bits(), t.to_bits());
        }
    }

    #[test]
    fn test_hermite() {
        assert_table(
            hermite,
            &[0.0, 0.028, 0.104, 0.216, 0.352, 0.5, 0.648, 0.784, 0.896, 0.972, 1.0],
            5e-4,
        );
    }

    #[test]
    fn test_quintic() {
        assert_table(
            quintic,
            &[
                0.0, 0.008_56, 0.057_92, 0.163_08, 0.317_44, 0.5, 0.682_56, 0.836_92, 0.942_08,
                0.991_44, 1.0,
            ],
            5e-7,
        );
        let result = quintic(0.25);
        assert!((result - 0.103_515_625).abs() < 1e-10);
    }

    #[test]
    fn test_heptic() {
        assert_table(
            heptic,
            &[
                0.0,
                0.076_855_750_507_422_1,
                0.179_233_689_599_999_97,
                0.302_383_908_769_922_05,
                0.438_879_750_400_000_4,
                0.579_357_147_216_796_9,
                0.713_451_110_399_999_9,
                0.830_822_896_348_047_3,
                0.922_172_169_599_999_6,
                0.980_137_063_163_672_6,
                1.0,
            ],
            5e-7,
        );
    }

    #[test]
    fn test_trigonometric() {
        assert_table(
            trigonometric,
            &[
                0.0,
                0.024_471_741_852_423_234,
                0.095_491_502_812_526_27,
                0.206_107_373_853_763_43,
                0.345_491_502_812_526_33,
                0.5,
                0.654_508_497_187_473_7,
                0.793_892_626_146_236_5,
                0.904_508_497_187_473_7,
                0.975_528_258_147_576_8,
                1.0,
            ],
            5e-7,
        );
    }

    #[test]
    fn test_power_ease() {
        let square = power_ease(2.0);
        assert_eq!(square(0.5), 0.25);
        assert_eq!(square(0.0), 0.0);
        assert_eq!(square(1.0), 1.0);
        assert!(power_ease(0.0)(0.5).is_finite());
    }

    #[test]
    fn test_boundaries() {
        let kernels = [
            Blend::Linear,
            Blend::Hermite,
            Blend::Quintic,
            Blend::Heptic,
            Blend::Trigonometric,
            Blend::Power(3.0),
            Blend::Custom(|t| t * t),
        ];
        for blend in kernels {
            assert_eq!(blend.apply(0.0).to_bits(), 0.0_f64.to_bits(), "{blend:?}");
            assert_eq!(blend.apply(1.0).to_bits(), 1.0_f64.to_bits(), "{blend:?}");
        }
        assert_eq!(hermite(0.5).to_bits(), 0.5_f64.to_bits());
        assert_eq!(quintic(0.5).to_bits(), 0.5_f64.to_bits());
    }

    #[test]
    fn test_monotonic() {
        let kernels = [
            Blend::Hermite,
            Blend::Quintic,
            Blend::Heptic,
            Blend::Trigonometric,
            Blend::Power(2.5),
        ];
        for blend in kernels {
            let mut previous = blend.apply(0.0);
            for step in 1..=1000 {
                let value = blend.apply(f64::from(step) / 1000.0);
                assert!(value >= previous, "{blend:?} decreases at step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 20.0).to_bits(), 10.0_f64.to_bits());
        assert_eq!(lerp(1.0, 10.0, 20.0).to_bits(), 20.0_f64.to_bits());
        assert_eq!(lerp(0.5, 10.0, 20.0).to_bits(), 15.0_f64.to_bits());
        assert_eq!(lerp(0.25, 0.0, 100.0), 25.0);
        assert_eq!(lerp(0.75, 0.0, 100.0), 75.0);
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(format!("{:.1}", interpolate(0.2, 0.0, 100.0, Blend::Hermite)), "10.4");
        assert_eq!(format!("{:.1}", interpolate(0.5, 0.0, 100.0, Blend::Hermite)), "50.0");
        assert_eq!(format!("{:.1}", interpolate(0.8, 0.0, 100.0, Blend::Hermite)), "89.6");
        assert_eq!(interpolate(0.25, 0.0, 100.0, Blend::Linear), 25.0);
    }

    #[test]
    fn test_bilerp() {
        assert_eq!(bilerp(0.0, 0.0, 0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(bilerp(1.0, 1.0, 1.0, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(bilerp(0.5, 0.5, 0.0, 0.5, 0.5, 1.0), 0.5);
        assert_eq!(bilerp(1.0, 0.0, 1.0, 2.0, 3.0, 4.0), 2.0);
        assert_eq!(bilerp(0.0, 1.0, 1.0, 2.0, 3.0, 4.0), 3.0);
    }

    #[test]
    fn test_trilerp() {
        assert_eq!(trilerp(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(trilerp(1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(trilerp(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5), 0.5);
        let corners = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(
            trilerp(
                1.0, 0.0, 1.0, corners[0], corners[1], corners[2], corners[3], corners[4],
                corners[5], corners[6], corners[7]
            ),
            6.0
        );
    }

    #[test]
    fn test_quadrilerp() {
        assert_eq!(quadrilerp([0.5; 4], &[0.0; 16]), 0.0);
        assert_eq!(quadrilerp([0.5; 4], &[0.5; 16]), 0.5);
        assert_eq!(quadrilerp([0.5; 4], &[1.0; 16]), 1.0);

        let corners: [f64; 16] = std::array::from_fn(|i| i as f64);
        assert_eq!(quadrilerp([1.0, 0.0, 1.0, 1.0], &corners), 13.0);
        // The field x + 2y + 4z + 8w is multilinear, so interpolation reproduces it.
        let value = quadrilerp([0.25, 0.5, 0.75, 0.5], &corners);
        assert!((value - (0.25 + 1.0 + 3.0 + 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_axis_order_does_not_matter() {
        let (v00, v10, v01, v11) = (0.1, 0.7, 0.4, 0.9);
        let (dx, dy) = (0.3, 0.8);
        let x_first = bilerp(dx, dy, v00, v10, v01, v11);
        let y_first = bilerp(dy, dx, v00, v01, v10, v11);
        assert!((x_first - y_first).abs() < 1e-12);
    }

    #[test]
    fn test_floor() {
        assert_eq!(floor(1.5), 1);
        assert_eq!(floor(-1.5), -2);
        assert_eq!(floor(0.0), 0);
        assert_eq!(floor(-0.1), -1);
        assert_eq!(floor(-3.0), -3);
    }

    #[test]
    fn test_consistent_modulus() {
        assert_eq!(consistent_modulus(3, 10), 3);
        assert_eq!(consistent_modulus(13, 10), 3);
        assert_eq!(consistent_modulus(-1, 10), 9);
        assert_eq!(consistent_modulus(-10, 10), 0);
        assert_eq!(consistent_modulus(-23, 10), 7);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot2([1.0, 0.0], 1.0, 0.0), 1.0);
        assert_eq!(dot2([1.0, 0.0], -1.0, 0.0), -1.0);
        assert_eq!(dot2([1.0, 0.0], 0.25, 0.25), 0.25);
        assert_eq!(dot3([0.5, 0.5, 0.0], 1.0, 1.0, 1.0), 1.0);
    }
}
