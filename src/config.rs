//! Sketch configuration: the `(precision, seed)` pair fixed at construction.
//!
//! Two sketches are comparable and mergeable only when their configurations are equal.
//! - `precision` (`p`): number of low hash bits used as register index, `m = 2^p` registers.
//! - `seed`: MurmurHash3 seed, part of the hash identity.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Smallest supported precision (2 registers).
pub const MIN_PRECISION: u32 = 1;
/// Largest supported precision (64 MiB of registers).
pub const MAX_PRECISION: u32 = 26;
/// Precision used by `SketchConfig::default()`, 4096 registers.
pub const DEFAULT_PRECISION: u32 = 12;

/// Validated sketch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SketchConfig {
    precision: u32,
    seed: u32,
}

impl SketchConfig {
    /// Creates configuration with given precision and seed.
    pub fn new(precision: u32, seed: u32) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(Error::InvalidConfig(format!(
                "precision must be in [{MIN_PRECISION}..{MAX_PRECISION}] range, got {precision} \
                 (precision above {MAX_PRECISION} is rejected to bound register memory to 64 MiB)"
            )));
        }
        Ok(Self { precision, seed })
    }

    /// Creates configuration from a register count, which must be a power of two `>= 2`.
    pub fn from_num_registers(num_registers: usize, seed: u32) -> Result<Self> {
        if num_registers < 2 || !num_registers.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "number of registers must be a power of two >= 2, got {num_registers}"
            )));
        }
        Self::new(num_registers.trailing_zeros(), seed)
    }

    /// Returns the same precision with another seed.
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of registers `m = 2^p`
    #[inline]
    pub fn num_registers(&self) -> usize {
        1 << self.precision
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            seed: 0,
        }
    }
}

impl Display for SketchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "p={}, seed={:#x}", self.precision, self.seed)
    }
}
