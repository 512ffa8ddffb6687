//! Fast factor encoding and grouped aggregation
//!
//! A [`Factor`] assigns each distinct value of a categorical column a dense
//! 1-based level number. Measurements aligned with that column can then be
//! collapsed to one value per level (sum, mean, count, min, max) in a single
//! linear pass, without sorting the data.
//!
//! ```
//! use ftools::{AggMethod, Factor};
//!
//! let factor = Factor::from_values(&["a", "b", "a", "c", "b", "a"], true).unwrap();
//! assert_eq!(factor.level_index(), &[1, 2, 1, 3, 2, 1]);
//! assert_eq!(factor.counts(), &[3, 2, 1]);
//!
//! let sums = factor
//!     .collapse(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], AggMethod::Sum)
//!     .unwrap();
//! assert_eq!(sums, vec![100.0, 70.0, 40.0]);
//! ```

pub mod config;
pub mod error;
pub mod factor;
pub mod value;

// Re-export commonly used types
pub use config::{FactorConfig, HashMethod};
pub use error::{Error, FtoolsError, Result};
pub use factor::collapse::{collapse, collapse_by_name, collapse_many, collapse_numeric};
pub use factor::{factorize, factorize_with, AggMethod, Factor, Grouping, LevelAssignment};
pub use value::{Scalar, ScalarKind};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
