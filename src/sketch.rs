//! ## HyperLogLog sketch
//! Fixed-size array of `m = 2^p` registers, allocated once at construction.
//! Memory does not depend on the number of distinct keys inserted.
//!
//! Register `i` stores the largest rank observed among keys hashed into bucket `i`
//! (see [`crate::bucket`]). Ranks never exceed `33 - p`, so one byte per register is enough.
//!
//! Merge is a register-wise maximum: commutative, associative and idempotent, so partial
//! sketches built over any partitioning of the data combine into the same result.

use std::fmt::{Debug, Formatter};
use std::mem::{size_of, size_of_val};

use tracing::{debug, trace};

use crate::bucket::{extract, max_rank};
use crate::config::SketchConfig;
use crate::error::{Error, Result};
use crate::estimator;
use crate::hash::hash_key;

/// HyperLogLog sketch of `2^p` one-byte registers, mergeable with sketches of equal configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Sketch {
    config: SketchConfig,
    registers: Vec<u8>,
}

impl Sketch {
    /// Creates empty sketch with `2^precision` registers.
    pub fn new(precision: u32, seed: u32) -> Result<Self> {
        Ok(Self::with_config(SketchConfig::new(precision, seed)?))
    }

    /// Creates empty sketch with `num_registers` registers, which must be a power of two.
    pub fn with_num_registers(num_registers: usize, seed: u32) -> Result<Self> {
        Ok(Self::with_config(SketchConfig::from_num_registers(
            num_registers,
            seed,
        )?))
    }

    /// Creates empty sketch from already validated configuration.
    pub fn with_config(config: SketchConfig) -> Self {
        trace!(%config, "creating sketch");
        Self {
            config,
            registers: vec![0; config.num_registers()],
        }
    }

    /// Rebuilds sketch from register contents, e.g. received from another worker.
    pub fn from_registers(config: SketchConfig, registers: Vec<u8>) -> Result<Self> {
        if registers.len() != config.num_registers() {
            return Err(Error::InvalidConfig(format!(
                "expected {} registers for {config}, got {}",
                config.num_registers(),
                registers.len()
            )));
        }
        let max = max_rank(config.precision());
        if let Some(idx) = registers.iter().position(|&r| u32::from(r) > max) {
            return Err(Error::InvalidConfig(format!(
                "register {idx} holds rank {} above maximum {max} for {config}",
                registers[idx]
            )));
        }
        Ok(Self { config, registers })
    }

    /// Insert key into the sketch. An empty key is rejected and leaves the sketch unchanged.
    #[inline]
    pub fn update<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> Result<()> {
        let h = hash_key(key, self.config.seed())?;
        self.update_hash(h);
        Ok(())
    }

    /// Insert precomputed MurmurHash3 value, which must have been hashed with this sketch's seed.
    #[inline]
    pub fn update_hash(&mut self, h: u32) {
        let (idx, rank) = extract(h, self.config.precision());
        // `idx < 2^p == registers.len()`
        let reg = &mut self.registers[idx as usize];
        // `rank <= 33 - p <= 32`, so the narrowing cannot truncate
        let rank = rank as u8;
        if rank > *reg {
            *reg = rank;
        }
    }

    /// Merge `rhs` into `self`. Fails without touching `self` if configurations differ.
    pub fn merge(&mut self, rhs: &Sketch) -> Result<()> {
        self.check_compatible(rhs)?;
        for (lhs, &rhs) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            if rhs > *lhs {
                *lhs = rhs;
            }
        }
        Ok(())
    }

    /// Return new sketch combining `self` and `rhs`, leaving both intact.
    pub fn merged(&self, rhs: &Sketch) -> Result<Sketch> {
        self.check_compatible(rhs)?;
        let mut result = self.clone();
        result.merge(rhs)?;
        Ok(result)
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> f64 {
        estimator::estimate(self)
    }

    #[inline]
    pub fn config(&self) -> SketchConfig {
        self.config
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.config.precision()
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.config.seed()
    }

    #[inline]
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Return whether nothing has been inserted yet
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }

    /// Return memory size of `Sketch`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(self.registers.as_slice())
    }

    fn check_compatible(&self, rhs: &Sketch) -> Result<()> {
        if self.config != rhs.config {
            debug!(
                lhs = %self.config,
                rhs = %rhs.config,
                "rejecting merge of incompatible sketches"
            );
            return Err(Error::IncompatibleSketch {
                lhs: self.config,
                rhs: rhs.config,
            });
        }
        Ok(())
    }
}

impl Debug for Sketch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ {}, estimate: {:.0}, size: {} }}",
            self.config,
            self.estimate(),
            self.size_of()
        )
    }
}
