//! Seedable pseudo-random number generators for procedural noise.
//!
//! Two generators are provided:
//!
//! - [`Alea`] - three-word fractional generator with exportable state
//! - [`Mulberry32`] - single-word integer generator with a functional form
//!
//! Both produce doubles in `[0, 1)` and are fully determined by their seed.

pub mod alea;
pub mod mulberry;

use std::fmt::{self, Display};

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

pub use alea::{Alea, AleaState};
pub use mulberry::Mulberry32;

/// Equivalent to 2^32.
pub(crate) const TWO_POW_32: f64 = 4_294_967_296.0;

/// Equivalent to 2^-32.
pub(crate) const TWO_POW_NEG_32: f64 = 1.0 / TWO_POW_32;

/// Common interface of every random source used to build noise tables.
#[enum_dispatch]
pub trait Random {
    /// Returns the next double in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns an integer in `[0, 2^32)`, built as `next_f64() * 2^32`.
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * TWO_POW_32) as u32
    }

    /// Returns `trunc(next_f64() * bound)`, an index in `[0, bound)`.
    fn next_bounded(&mut self, bound: usize) -> usize {
        ((self.next_f64() * bound as f64) as usize).min(bound.saturating_sub(1))
    }

    /// Advances the generator by `count` draws.
    fn consume_count(&mut self, count: usize) {
        for _ in 0..count {
            self.next_f64();
        }
    }
}

/// The built-in generators behind a single type.
#[enum_dispatch(Random)]
#[derive(Debug, Clone)]
pub enum RandomSource {
    /// An [`Alea`] generator.
    Alea(Alea),
    /// A [`Mulberry32`] generator.
    Mulberry32(Mulberry32),
}

impl RandomSource {
    /// Creates an Alea-backed source from a seed.
    #[must_use]
    pub fn alea(seed: &Seed) -> Self {
        RandomSource::Alea(Alea::from_seed(seed))
    }

    /// Creates a Mulberry32-backed source from an integer seed.
    #[must_use]
    pub fn mulberry(seed: u32) -> Self {
        RandomSource::Mulberry32(Mulberry32::new(seed))
    }
}

/// A seed accepted by the generators: an integer, any other number, or a string.
///
/// Numbers are hashed through their shortest decimal text, written the way
/// JavaScript prints numbers, so `Seed::Int(42)`, `Seed::Float(42.0)` and
/// `Seed::Text("42")` produce the same sequence, as do `Seed::Float(1.5)`
/// and `Seed::Text("1.5")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// An integral seed.
    Int(i64),
    /// A fractional or out-of-range numeric seed.
    Float(f64),
    /// A text seed.
    Text(String),
}

impl Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Int(value) => write!(f, "{value}"),
            Seed::Float(value) => write_number(f, *value),
            Seed::Text(text) => f.write_str(text),
        }
    }
}

/// Writes `value` as JavaScript's `Number.prototype.toString` does.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return f.write_str("0");
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{value}");
    }
    // Exponent form, with an explicit sign on positive exponents.
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&text),
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Int(value)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Float(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

/// Adapts a closure returning doubles in `[0, 1)` into a [`Random`].
pub struct FnRandom<F>(pub F);

impl<F> Random for FnRandom<F>
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        (self.0)()
    }
}

/// Wraps `f` so it can be passed anywhere a [`Random`] is expected.
pub fn from_fn<F>(f: F) -> FnRandom<F>
where
    F: FnMut() -> f64,
{
    FnRandom(f)
}
