//! Factor: dense level coding of a categorical column
//!
//! A [`Factor`] is built once from a snapshot of the input and never changes
//! afterwards. Any number of reductions can run against it, from any number of
//! threads.

pub mod collapse;
pub mod factorize;

use std::fmt;
use std::hash::Hash;

use crate::config::{FactorConfig, HashMethod};
use crate::error::{Error, Result};
use crate::value::{validate_scalars, Scalar};

pub use self::collapse::{AggMethod, Grouping};
pub use self::factorize::{factorize, factorize_with, LevelAssignment};

/// Categorical variable encoded as 1-based level numbers
#[derive(Debug, Clone)]
pub struct Factor<T> {
    /// 1-based level of each observation
    level_index: Vec<usize>,
    /// Observations per level
    counts: Vec<usize>,
    /// Distinct values in level order, kept when `save_keys` is set
    keys: Option<Vec<T>>,
    config: FactorConfig,
}

impl<T> Factor<T>
where
    T: Ord + Hash + Clone,
{
    /// Build a factor from a slice of values
    ///
    /// # Arguments
    /// * `values` - The categorical data
    /// * `config` - Construction settings
    pub fn new(values: &[T], config: FactorConfig) -> Result<Self> {
        log::debug!(
            "factorizing {} observations with {} (resolved to {})",
            values.len(),
            config.method,
            config.method.resolve()
        );

        let assignment = factorize_with(values, config.method, config.sort_levels);
        let (levels, level_index, counts) = assignment.into_parts();

        let factor = Factor {
            level_index,
            counts,
            keys: if config.save_keys { Some(levels) } else { None },
            config,
        };

        if factor.config.verbose {
            log::info!(
                "Created factor with {} levels and {} observations",
                factor.num_levels(),
                factor.num_obs()
            );
        }

        Ok(factor)
    }

    /// Build a factor with default settings apart from level ordering
    pub fn from_values(values: &[T], sort_levels: bool) -> Result<Self> {
        Self::new(values, FactorConfig::default().with_sort_levels(sort_levels))
    }

    /// 1-based level of `value`, if the keys were saved and `value` occurs
    ///
    /// Sorted levels are binary searched. With `sort_levels = false` this is a
    /// linear scan over the keys, so avoid it in per-observation loops.
    pub fn level_of(&self, value: &T) -> Option<usize> {
        let keys = self.keys.as_ref()?;
        let pos = if self.config.sort_levels {
            keys.binary_search(value).ok()
        } else {
            keys.iter().position(|k| k == value)
        };
        pos.map(|p| p + 1)
    }
}

impl Factor<Scalar> {
    /// Build a factor from dynamically typed values
    ///
    /// Fails with [`Error::NotFlat`] on nested lists and with
    /// [`Error::TypeMismatch`] when values cannot be ordered together.
    pub fn from_scalars(values: &[Scalar], config: FactorConfig) -> Result<Self> {
        let values = validate_scalars(values)?;
        Self::new(&values, config)
    }

    /// Build a factor from a JSON array of scalars
    pub fn from_json(text: &str, config: FactorConfig) -> Result<Self> {
        let items = match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(Error::NotFlat(format!(
                    "expected a JSON array, found {}",
                    json_type(&other)
                )))
            }
        };

        let values = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                serde_json::Value::Null => Err(Error::TypeMismatch(format!(
                    "element {} is null; missing values are not supported",
                    i
                ))),
                serde_json::Value::Object(_) => Err(Error::NotFlat(format!(
                    "element {} is an object, expected a scalar",
                    i
                ))),
                other => Ok(serde_json::from_value::<Scalar>(other)?),
            })
            .collect::<Result<Vec<Scalar>>>()?;

        Self::from_scalars(&values, config)
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl<T> Factor<T> {
    /// Number of observations
    pub fn num_obs(&self) -> usize {
        self.level_index.len()
    }

    /// Number of levels
    pub fn num_levels(&self) -> usize {
        self.counts.len()
    }

    /// 1-based level of each observation
    pub fn level_index(&self) -> &[usize] {
        &self.level_index
    }

    /// Observations per level
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Distinct values in level order, `None` unless `save_keys` was set
    pub fn keys(&self) -> Option<&[T]> {
        self.keys.as_deref()
    }

    /// Settings the factor was built with
    pub fn config(&self) -> &FactorConfig {
        &self.config
    }

    /// Hashing method label the factor was built with
    pub fn method(&self) -> HashMethod {
        self.config.method
    }

    /// Original value of observation `i`, if the keys were saved
    pub fn value_at(&self, i: usize) -> Option<&T> {
        let level = *self.level_index.get(i)?;
        self.keys.as_ref()?.get(level - 1)
    }

    /// Observation positions of each level, ascending within a level
    pub fn partition(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> =
            self.counts.iter().map(|&c| Vec::with_capacity(c)).collect();
        for (obs, &level) in self.level_index.iter().enumerate() {
            groups[level - 1].push(obs);
        }
        groups
    }

    /// Reduce `measurements` to one value per level
    pub fn collapse(&self, measurements: &[f64], method: AggMethod) -> Result<Vec<f64>> {
        collapse::collapse(self, measurements, method)
    }

    /// Reduce `measurements` with a method given by name
    pub fn collapse_by_name(&self, measurements: &[f64], method: &str) -> Result<Vec<f64>> {
        collapse::collapse_by_name(self, measurements, method)
    }

    /// Reduce integer or float measurements to one value per level
    pub fn collapse_numeric<V>(&self, measurements: &[V], method: AggMethod) -> Result<Vec<f64>>
    where
        V: num_traits::ToPrimitive,
    {
        collapse::collapse_numeric(self, measurements, method)
    }

    /// Reduce several measurement columns in parallel
    pub fn collapse_many(&self, columns: &[&[f64]], method: AggMethod) -> Result<Vec<Vec<f64>>>
    where
        T: Sync,
    {
        collapse::collapse_many(self, columns, method)
    }
}

impl<T> Grouping for Factor<T> {
    fn level_index(&self) -> &[usize] {
        &self.level_index
    }

    fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl<T> fmt::Display for Factor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Factor(num_levels={}, num_obs={}, method='{}')",
            self.num_levels(),
            self.num_obs(),
            self.config.method
        )
    }
}
