//! Lattice addressing: per-axis wraparound and the strategies that map a
//! lattice corner to a pool index.
//!
//! Three strategies trade memory for lookup cost:
//!
//! - [`DenseTable`] stores one pool index per lattice cell, including the
//!   duplicated wrap planes, and answers lookups with a single read.
//! - [`StreamingTable`] stores one shuffled permutation per axis and mixes
//!   the three permuted values at lookup time.
//! - [`HashedIndex`] stores nothing and hashes the coordinates directly,
//!   which is the only option for unbounded axes.

use enum_dispatch::enum_dispatch;
use rustle_random::Random;

use crate::{
    config::{ConfigError, MemoryMode},
    math::{consistent_modulus, floor},
    pairing::{Pairing, fold, hash, mix3, pair3d},
    pool::POOL_SIZE,
};

/// Largest `x·y·z` for which automatic selection still builds a dense table.
pub const DENSE_THRESHOLD: u64 = 256 * 256 * 256;

/// Largest number of cells a forced dense table may hold.
pub const MAX_DENSE_CELLS: u64 = 1 << 28;

/// Largest axis size a streaming table stores a permutation for. Longer axes hash.
pub const MAX_STREAMING_AXIS: u32 = 1 << 20;

const POOL_MASK: u32 = POOL_SIZE as u32 - 1;

/// One lattice axis. A size of `0` means unbounded: the axis never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    size: u32,
}

impl Axis {
    /// Creates an axis that wraps every `size` units, or never when `size` is `0`.
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    /// Returns the wrap period, `0` when unbounded.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns whether the axis wraps.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.size != 0
    }

    /// Splits a coordinate into the lower and upper lattice indices of its
    /// cell and the fractional offset inside it.
    ///
    /// Bounded axes fold the floor through a consistent modulus and wrap the
    /// upper index back to `0` at the boundary, so `x` and `x + size` resolve
    /// to the same cell. Unbounded axes fold through `2^32` instead.
    #[inline]
    #[must_use]
    pub fn cell(&self, coordinate: f64) -> (u32, u32, f64) {
        let base = floor(coordinate);
        let fraction = coordinate - base as f64;
        if self.size == 0 {
            let lower = base as u32;
            return (lower, lower.wrapping_add(1), fraction);
        }
        let lower = consistent_modulus(base, i64::from(self.size)) as u32;
        let upper = if lower + 1 >= self.size { 0 } else { lower + 1 };
        (lower, upper, fraction)
    }

    /// Number of table slots along this axis, including the duplicated wrap slot.
    fn extent(self) -> usize {
        self.size as usize + 1
    }
}

/// How lattice corners are mapped onto the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full precomputed table.
    Dense,
    /// Per-axis permutations mixed at lookup time.
    Streaming,
    /// Pairing and hashing with no precomputed state.
    Hashed,
}

impl Strategy {
    /// Picks the strategy for the used `axes` under `mode`.
    ///
    /// `Auto` hashes when any axis is unbounded or longer than
    /// [`MAX_STREAMING_AXIS`], builds a dense table when the product of the
    /// sizes is at most [`DENSE_THRESHOLD`] and streams otherwise. `Low`
    /// never builds a dense table. `High` always does and fails when the
    /// table cannot exist.
    pub fn select(axes: &[Axis], mode: MemoryMode) -> Result<Self, ConfigError> {
        let unbounded = axes.iter().any(|axis| !axis.is_bounded());
        let oversized = axes.iter().any(|axis| axis.size > MAX_STREAMING_AXIS);
        let strategy = match mode {
            MemoryMode::Auto | MemoryMode::Low if unbounded || oversized => Strategy::Hashed,
            MemoryMode::Auto => {
                let cells = axes
                    .iter()
                    .fold(1u64, |cells, axis| cells.saturating_mul(u64::from(axis.size)));
                if cells <= DENSE_THRESHOLD {
                    Strategy::Dense
                } else {
                    Strategy::Streaming
                }
            }
            MemoryMode::Low => Strategy::Streaming,
            MemoryMode::High if unbounded => return Err(ConfigError::UnboundedDenseTable),
            MemoryMode::High => {
                let cells = dense_cells(axes);
                if cells > MAX_DENSE_CELLS {
                    return Err(ConfigError::DenseTableTooLarge { cells });
                }
                Strategy::Dense
            }
        };
        log::debug!("Selected {strategy:?} lattice for {axes:?} in {mode:?} mode");
        Ok(strategy)
    }
}

/// Cell count of a dense table over `axes`, wrap planes included.
fn dense_cells(axes: &[Axis]) -> u64 {
    axes.iter()
        .fold(1u64, |cells, axis| cells.saturating_mul(axis.extent() as u64))
}

/// Maps a lattice corner to an index into a pool of [`POOL_SIZE`] entries.
///
/// Coordinates of unused axes are always `0`.
#[enum_dispatch]
pub trait LatticeIndex {
    /// Returns the pool index of corner `(x, y, z)`.
    fn index(&self, x: u32, y: u32, z: u32) -> usize;
}

/// A built lattice strategy.
#[enum_dispatch(LatticeIndex)]
#[derive(Debug, Clone)]
pub enum Permutation {
    /// See [`DenseTable`].
    Dense(DenseTable),
    /// See [`StreamingTable`].
    Streaming(StreamingTable),
    /// See [`HashedIndex`].
    Hashed(HashedIndex),
}

impl Permutation {
    /// Builds `strategy` over `axes`, drawing any tables from `random`.
    pub fn build(
        strategy: Strategy,
        axes: &[Axis],
        pairing: Pairing,
        random: &mut impl Random,
    ) -> Self {
        match strategy {
            Strategy::Dense => Permutation::Dense(DenseTable::new(axes, random)),
            Strategy::Streaming => Permutation::Streaming(StreamingTable::new(axes, random)),
            Strategy::Hashed => Permutation::Hashed(HashedIndex::new(axes.len(), pairing)),
        }
    }
}

/// Fisher-Yates shuffle driven by `random`.
fn shuffle<T>(values: &mut [T], random: &mut impl Random) {
    let len = values.len();
    for i in 0..len {
        let j = random.next_bounded(len - i);
        values.swap(i, i + j);
    }
}

/// Precomputed pool index for every lattice cell.
///
/// Each used axis has `size + 1` slots; the last slot repeats the first, so
/// the table tiles seamlessly even when read at `size`.
#[derive(Debug, Clone)]
pub struct DenseTable {
    cells: Vec<u8>,
    extents: [usize; 3],
}

impl DenseTable {
    /// Draws one pool index per cell of the bounded `axes`.
    pub fn new(axes: &[Axis], random: &mut impl Random) -> Self {
        let mut extents = [1usize; 3];
        let mut sizes = [1usize; 3];
        for (i, axis) in axes.iter().enumerate() {
            extents[i] = axis.extent();
            sizes[i] = axis.size as usize;
        }
        let [ex, ey, ez] = extents;
        let mut cells = vec![0u8; ex * ey * ez];

        // Cells are filled in storage order, so a wrapped source is always
        // written before the duplicate that copies it.
        for z in 0..ez {
            for y in 0..ey {
                for x in 0..ex {
                    let slot = x + ex * (y + ey * z);
                    let (wx, wy, wz) = (x % sizes[0], y % sizes[1], z % sizes[2]);
                    cells[slot] = if (wx, wy, wz) == (x, y, z) {
                        random.next_bounded(POOL_SIZE) as u8
                    } else {
                        cells[wx + ex * (wy + ey * wz)]
                    };
                }
            }
        }

        log::debug!("Built dense lattice with {} cells", cells.len());
        Self { cells, extents }
    }

    /// Number of stored cells, wrap planes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the table holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl LatticeIndex for DenseTable {
    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let [ex, ey, _] = self.extents;
        usize::from(self.cells[x as usize + ex * (y as usize + ey * z as usize)])
    }
}

/// One shuffled permutation per axis, combined with [`mix3`] at lookup.
#[derive(Debug, Clone)]
pub struct StreamingTable {
    axes: [Vec<u32>; 3],
}

impl StreamingTable {
    /// Shuffles a permutation of `0..size` for every used axis.
    pub fn new(axes: &[Axis], random: &mut impl Random) -> Self {
        let mut permutations: [Vec<u32>; 3] = [vec![0], vec![0], vec![0]];
        for (permutation, axis) in permutations.iter_mut().zip(axes) {
            let mut values: Vec<u32> = (0..axis.size).collect();
            shuffle(&mut values, random);
            // Repeat the first entry so a lookup at `size` tiles.
            values.push(values.first().copied().unwrap_or_default());
            *permutation = values;
        }

        log::debug!(
            "Built streaming lattice with {} permutation entries",
            permutations.iter().map(Vec::len).sum::<usize>()
        );
        Self { axes: permutations }
    }
}

impl LatticeIndex for StreamingTable {
    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let [px, py, pz] = &self.axes;
        (mix3(px[x as usize], py[y as usize], pz[z as usize]) & POOL_MASK) as usize
    }
}

/// Table-free indexing through pairing functions and [`hash`].
#[derive(Debug, Clone, Copy)]
pub struct HashedIndex {
    dimensions: usize,
    pairing: Pairing,
}

impl HashedIndex {
    /// Creates an index for `dimensions` axes using `pairing` in two dimensions.
    #[must_use]
    pub fn new(dimensions: usize, pairing: Pairing) -> Self {
        log::debug!("Using hashed lattice ({dimensions}d, {pairing:?})");
        Self {
            dimensions,
            pairing,
        }
    }
}

impl LatticeIndex for HashedIndex {
    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let key = match self.dimensions {
            1 => x,
            2 => fold(self.pairing.pair(u64::from(x), u64::from(y))),
            _ => pair3d(x, y, z),
        };
        (hash(key) & POOL_MASK) as usize
    }
}
