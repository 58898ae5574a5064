use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{Random, Seed, TWO_POW_32, TWO_POW_NEG_32};

/// Multiplier used by the mash hash.
const MASH_MAGIC: f64 = 0.025_196_032_824_169_38;

/// Initial state of the mash hash.
const MASH_INITIAL: u32 = 0xEFC8_249D;

/// Step multiplier of the generator.
const STEP_MULTIPLIER: f64 = 2_091_639.0;

/// 2^-53, the weight of the extra bits mixed in by [`Alea::fract53`].
const FRACTIONAL_FIX: f64 = f64::EPSILON / 2.0;

/// 2^21, the number of extra values mixed in by [`Alea::fract53`].
const TWO_POW_21: f64 = 2_097_152.0;

/// Truncates to an integer and wraps into `[0, 2^32)`.
#[inline]
fn to_uint32(value: f64) -> f64 {
    f64::from(value as u64 as u32)
}

/// Stateful string hash used to derive the three seed words.
struct Mash {
    state: f64,
}

impl Mash {
    fn new() -> Self {
        Self {
            state: f64::from(MASH_INITIAL),
        }
    }

    /// Folds every UTF-16 unit of `data` into the state and returns a value in `[0, 1)`.
    fn mash(&mut self, data: &str) -> f64 {
        for unit in data.encode_utf16() {
            self.state += f64::from(unit);
            let mut h = MASH_MAGIC * self.state;
            self.state = to_uint32(h);
            h -= self.state;
            h *= self.state;
            self.state = to_uint32(h);
            h -= self.state;
            self.state += h * TWO_POW_32;
        }
        to_uint32(self.state) * TWO_POW_NEG_32
    }
}

/// Snapshot of an [`Alea`] generator.
///
/// Importing a snapshot makes the generator replay exactly the sequence that
/// followed the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AleaState {
    /// First seed word.
    pub seed0: f64,
    /// Second seed word.
    pub seed1: f64,
    /// Third seed word, also the last returned value.
    pub seed2: f64,
    /// Integer carry.
    pub constant: f64,
}

/// Alea pseudo-random number generator.
///
/// Each step computes `t = 2091639 * s0 + c * 2^-32`, rotates the seed words
/// and keeps the fractional part of `t` as the output.
#[derive(Debug, Clone)]
pub struct Alea {
    s0: f64,
    s1: f64,
    s2: f64,
    c: f64,
}

impl Alea {
    /// Creates a generator from a string seed.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        let mut mash = Mash::new();
        let mut s0 = mash.mash(" ");
        let mut s1 = mash.mash(" ");
        let mut s2 = mash.mash(" ");

        s0 -= mash.mash(seed);
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.mash(seed);
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.mash(seed);
        if s2 < 0.0 {
            s2 += 1.0;
        }

        Self { s0, s1, s2, c: 1.0 }
    }

    /// Creates a generator from a [`Seed`].
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(&seed.to_string())
    }

    /// Creates a generator seeded from the current time in milliseconds.
    ///
    /// The sequence is not reproducible; pass an explicit seed when determinism matters.
    #[must_use]
    pub fn from_time() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        log::trace!("Seeding alea from time: {millis}");
        Self::new(&millis.to_string())
    }

    /// Returns the next value in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        let t = STEP_MULTIPLIER * self.s0 + self.c * TWO_POW_NEG_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.floor();
        self.s2 = t - self.c;
        self.s2
    }

    /// Returns an integer in `[0, 2^32)`.
    #[inline]
    pub fn uint32(&mut self) -> u32 {
        (self.random() * TWO_POW_32) as u32
    }

    /// Returns a value in `[0, 1)` with 53 bits of precision, consuming two draws.
    #[inline]
    pub fn fract53(&mut self) -> f64 {
        let high = self.random();
        let low = (self.random() * TWO_POW_21).trunc();
        high + low * FRACTIONAL_FIX
    }

    /// Exports the current state.
    #[must_use]
    pub fn export_state(&self) -> AleaState {
        AleaState {
            seed0: self.s0,
            seed1: self.s1,
            seed2: self.s2,
            constant: self.c,
        }
    }

    /// Replaces the current state.
    pub fn import_state(&mut self, state: AleaState) {
        self.s0 = state.seed0;
        self.s1 = state.seed1;
        self.s2 = state.seed2;
        self.c = state.constant;
    }
}

impl From<AleaState> for Alea {
    fn from(state: AleaState) -> Self {
        Self {
            s0: state.seed0,
            s1: state.seed1,
            s2: state.seed2,
            c: state.constant,
        }
    }
}

impl Random for Alea {
    fn next_f64(&mut self) -> f64 {
        self.random()
    }

    fn next_u32(&mut self) -> u32 {
        self.uint32()
    }
}
