//! `cardinality-sketch` estimates the number of distinct keys in a stream or dataset too large to
//! deduplicate exactly, e.g. distinct words across a corpus split over many files or workers.
//!
//! Keys are hashed with seedable 32-bit MurmurHash3 into a fixed-size HyperLogLog sketch.
//! Sketches built independently per partition merge into one global sketch, in any order or
//! grouping, without re-scanning data.
//!
//! ```
//! use cardinality_sketch::{MergeDriver, Sketch, SketchConfig};
//!
//! let config = SketchConfig::new(10, 0)?;
//! let mut lhs = Sketch::with_config(config);
//! let mut rhs = Sketch::with_config(config);
//! for i in 0..5000 {
//!     lhs.update(&format!("lhs-{i}"))?;
//!     rhs.update(&format!("rhs-{i}"))?;
//! }
//!
//! let estimate = MergeDriver::new(config).estimate([lhs, rhs])?;
//! assert!((estimate - 10_000.0).abs() < 1_500.0);
//! # Ok::<(), cardinality_sketch::Error>(())
//! ```
pub mod bucket;
pub mod config;
pub mod error;
pub mod estimator;
pub mod hash;
pub mod merge;
#[cfg(feature = "with_serde")]
mod serde;
pub mod sketch;

pub use config::SketchConfig;
pub use error::{Error, Result};
pub use merge::{MergeDriver, MergeStrategy};
pub use sketch::Sketch;
