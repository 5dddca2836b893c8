//! Reduce of per-partition sketches into one global sketch.
//!
//! Partial sketches are built independently by an external execution layer (threads,
//! processes, cluster tasks) and handed over as opaque values. Because merge is commutative,
//! associative and idempotent, every reduce shape yields the same registers; strategies only
//! differ in merge depth:
//! - `Fold`: sequential left fold, depth `n - 1`.
//! - `Tree`: pairwise reduce level by level, depth `ceil(log2(n))`.

use enum_dispatch::enum_dispatch;
use tracing::debug;

use crate::config::SketchConfig;
use crate::error::{Error, Result};
use crate::sketch::Sketch;

/// Reduce strategies supported by `MergeDriver`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[enum_dispatch]
pub enum MergeStrategy {
    Fold(Fold),
    Tree(Tree),
}

/// Reduce trait which must be implemented by all strategies.
#[enum_dispatch(MergeStrategy)]
pub trait Reduce {
    /// Merge all `partials` into one sketch, `None` if there is nothing to merge.
    fn reduce(&self, partials: Vec<Sketch>) -> Result<Option<Sketch>>;
    /// Number of sequential merge steps needed for `n` partials.
    fn depth(&self, n: usize) -> usize;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fold;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tree;

impl Reduce for Fold {
    fn reduce(&self, partials: Vec<Sketch>) -> Result<Option<Sketch>> {
        let mut iter = partials.into_iter();
        let Some(mut acc) = iter.next() else {
            return Ok(None);
        };
        for sketch in iter {
            acc.merge(&sketch)?;
        }
        Ok(Some(acc))
    }

    fn depth(&self, n: usize) -> usize {
        n.saturating_sub(1)
    }

    fn name(&self) -> &'static str {
        "fold"
    }
}

impl Reduce for Tree {
    fn reduce(&self, mut level: Vec<Sketch>) -> Result<Option<Sketch>> {
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut iter = level.into_iter();
            while let Some(mut lhs) = iter.next() {
                if let Some(rhs) = iter.next() {
                    lhs.merge(&rhs)?;
                }
                next.push(lhs);
            }
            level = next;
        }
        Ok(level.pop())
    }

    fn depth(&self, n: usize) -> usize {
        match n {
            0 | 1 => 0,
            _ => (usize::BITS - (n - 1).leading_zeros()) as usize,
        }
    }

    fn name(&self) -> &'static str {
        "tree"
    }
}

impl Default for MergeStrategy {
    fn default() -> Self {
        MergeStrategy::Tree(Tree)
    }
}

/// Combines partial sketches sharing one configuration and estimates their union.
#[derive(Debug, Clone)]
pub struct MergeDriver {
    config: SketchConfig,
    strategy: MergeStrategy,
}

impl MergeDriver {
    /// Creates driver accepting partial sketches built with `config`, using tree reduce.
    pub fn new(config: SketchConfig) -> Self {
        Self {
            config,
            strategy: MergeStrategy::default(),
        }
    }

    pub fn with_strategy(self, strategy: impl Into<MergeStrategy>) -> Self {
        Self {
            strategy: strategy.into(),
            ..self
        }
    }

    #[inline]
    pub fn config(&self) -> SketchConfig {
        self.config
    }

    #[inline]
    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Merge all `partials` into one sketch.
    ///
    /// Every partial is checked against the driver's configuration before anything is merged.
    /// No partials yield an empty sketch.
    pub fn reduce<I>(&self, partials: I) -> Result<Sketch>
    where
        I: IntoIterator<Item = Sketch>,
    {
        let partials: Vec<Sketch> = partials.into_iter().collect();
        if let Some(partial) = partials.iter().find(|s| s.config() != self.config) {
            debug!(
                expected = %self.config,
                actual = %partial.config(),
                "rejecting incompatible partial sketch"
            );
            return Err(Error::IncompatibleSketch {
                lhs: self.config,
                rhs: partial.config(),
            });
        }

        let partitions = partials.len();
        let merged = self
            .strategy
            .reduce(partials)?
            .unwrap_or_else(|| Sketch::with_config(self.config));
        debug!(
            partitions,
            strategy = self.strategy.name(),
            depth = self.strategy.depth(partitions),
            "reduced partial sketches"
        );
        Ok(merged)
    }

    /// Merge all `partials` and return the cardinality estimate of their union.
    pub fn estimate<I>(&self, partials: I) -> Result<f64>
    where
        I: IntoIterator<Item = Sketch>,
    {
        Ok(self.reduce(partials)?.estimate())
    }
}

/// Binary reduce function for external frameworks' own `reduce` primitives.
#[inline]
pub fn combine(mut lhs: Sketch, rhs: Sketch) -> Result<Sketch> {
    lhs.merge(&rhs)?;
    Ok(lhs)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    fn partials(config: SketchConfig, n: usize) -> Vec<Sketch> {
        (0..n)
            .map(|p| {
                let mut sketch = Sketch::with_config(config);
                for i in 0..(100 * (p + 1)) {
                    sketch.update(&format!("partition{p}-key{i}")).unwrap();
                }
                sketch
            })
            .collect()
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(2)]
    #[test_case(3)]
    #[test_case(7)]
    #[test_case(16)]
    fn test_strategies_agree(n: usize) {
        let config = SketchConfig::new(8, 42).unwrap();
        let fold = MergeDriver::new(config)
            .with_strategy(Fold)
            .reduce(partials(config, n))
            .unwrap();
        let tree = MergeDriver::new(config)
            .with_strategy(Tree)
            .reduce(partials(config, n))
            .unwrap();
        assert_eq!(fold, tree);
        assert_eq!(fold.config(), config);
        assert_eq!(fold.is_empty(), n == 0);
    }

    #[test]
    fn test_any_merge_shape() {
        let config = SketchConfig::new(8, 0).unwrap();
        let expected = MergeDriver::new(config).reduce(partials(config, 9)).unwrap();
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..10 {
            // random order and random pairing down to a single sketch
            let mut pending = partials(config, 9);
            pending.shuffle(&mut rng);
            while pending.len() > 1 {
                let i = rng.gen_range(0..pending.len());
                let lhs = pending.swap_remove(i);
                let j = rng.gen_range(0..pending.len());
                let rhs = pending.swap_remove(j);
                pending.push(combine(lhs, rhs).unwrap());
            }
            assert_eq!(pending.pop().unwrap(), expected);
        }
    }

    #[test]
    fn test_retried_partition() {
        // re-running a partition and merging it twice does not change the result
        let config = SketchConfig::new(8, 0).unwrap();
        let mut parts = partials(config, 4);
        let expected = MergeDriver::new(config).reduce(parts.clone()).unwrap();
        parts.push(parts[2].clone());
        assert_eq!(MergeDriver::new(config).reduce(parts).unwrap(), expected);
    }

    #[test]
    fn test_incompatible_partial() {
        let config = SketchConfig::new(8, 0).unwrap();
        let mut parts = partials(config, 3);
        parts.extend(partials(config.with_seed(1), 1));

        let result = MergeDriver::new(config).reduce(parts);
        assert_eq!(
            result.unwrap_err(),
            Error::IncompatibleSketch {
                lhs: config,
                rhs: config.with_seed(1),
            }
        );
    }

    #[test]
    fn test_estimate() {
        let config = SketchConfig::new(10, 0).unwrap();
        let driver = MergeDriver::new(config);
        assert_eq!(driver.estimate(Vec::new()).unwrap(), 0.0);

        // 100 + 200 + 300 + 400 distinct keys
        let estimate = driver.estimate(partials(config, 4)).unwrap();
        assert!((estimate - 1000.0).abs() < 100.0, "estimate = {estimate}");
    }

    #[test_case(MergeStrategy::Fold(Fold), 0 => 0)]
    #[test_case(MergeStrategy::Fold(Fold), 1 => 0)]
    #[test_case(MergeStrategy::Fold(Fold), 8 => 7)]
    #[test_case(MergeStrategy::Tree(Tree), 0 => 0)]
    #[test_case(MergeStrategy::Tree(Tree), 1 => 0)]
    #[test_case(MergeStrategy::Tree(Tree), 2 => 1)]
    #[test_case(MergeStrategy::Tree(Tree), 5 => 3)]
    #[test_case(MergeStrategy::Tree(Tree), 8 => 3)]
    #[test_case(MergeStrategy::Tree(Tree), 1024 => 10)]
    fn test_depth(strategy: MergeStrategy, n: usize) -> usize {
        strategy.depth(n)
    }
}
