//! Grouped reductions over a level assignment
//!
//! All reductions are a single pass over the observations that accumulates
//! into a buffer sized to the number of levels. The buffer belongs to the call,
//! so a factor can be shared between threads reducing different columns.

use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Aggregation applied to each level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggMethod {
    /// Sum of the measurements
    #[default]
    Sum,
    /// Arithmetic mean
    Mean,
    /// Number of observations; measurements are ignored
    Count,
    /// Smallest measurement; a NaN measurement makes its level NaN
    Min,
    /// Largest measurement; a NaN measurement makes its level NaN
    Max,
}

impl AggMethod {
    /// Every supported method
    pub const ALL: [AggMethod; 5] = [
        AggMethod::Sum,
        AggMethod::Mean,
        AggMethod::Count,
        AggMethod::Min,
        AggMethod::Max,
    ];

    /// Name used by [`AggMethod::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            AggMethod::Sum => "sum",
            AggMethod::Mean => "mean",
            AggMethod::Count => "count",
            AggMethod::Min => "min",
            AggMethod::Max => "max",
        }
    }

    fn supported() -> String {
        AggMethod::ALL
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AggMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AggMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::InvalidMethod {
                name: s.to_string(),
                supported: AggMethod::supported(),
            })
    }
}

/// Anything that maps observations to dense 1-based levels
pub trait Grouping {
    /// 1-based level number of each observation
    fn level_index(&self) -> &[usize];

    /// Observations per level
    fn counts(&self) -> &[usize];

    /// Number of observations
    fn num_obs(&self) -> usize {
        self.level_index().len()
    }

    /// Number of levels
    fn num_levels(&self) -> usize {
        self.counts().len()
    }
}

/// Reduce `measurements` to one value per level
///
/// # Arguments
/// * `groups` - Level assignment of the observations
/// * `measurements` - One value per observation
/// * `method` - Aggregation to apply
///
/// # Returns
/// * `Result<Vec<f64>>` - One value per level, position `k - 1` for level `k`
pub fn collapse<G>(groups: &G, measurements: &[f64], method: AggMethod) -> Result<Vec<f64>>
where
    G: Grouping + ?Sized,
{
    check_shape(groups, measurements.len())?;
    check_levels(groups)?;
    reduce(groups.level_index(), groups.counts(), measurements, method)
}

/// Same as [`collapse`] with the method given by name
pub fn collapse_by_name<G>(groups: &G, measurements: &[f64], method: &str) -> Result<Vec<f64>>
where
    G: Grouping + ?Sized,
{
    let method: AggMethod = method.parse()?;
    collapse(groups, measurements, method)
}

/// Same as [`collapse`] for any numeric measurement type
pub fn collapse_numeric<G, V>(groups: &G, measurements: &[V], method: AggMethod) -> Result<Vec<f64>>
where
    G: Grouping + ?Sized,
    V: ToPrimitive,
{
    check_shape(groups, measurements.len())?;
    check_levels(groups)?;
    let values = measurements
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.to_f64().ok_or_else(|| {
                Error::TypeMismatch(format!("measurement {} cannot be represented as f64", i))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    reduce(groups.level_index(), groups.counts(), &values, method)
}

/// Reduce several measurement columns in parallel
///
/// Every column is checked before any reduction starts; on error nothing is
/// returned.
pub fn collapse_many<G>(groups: &G, columns: &[&[f64]], method: AggMethod) -> Result<Vec<Vec<f64>>>
where
    G: Grouping + Sync + ?Sized,
{
    for column in columns {
        check_shape(groups, column.len())?;
    }
    check_levels(groups)?;

    columns
        .par_iter()
        .map(|column| reduce(groups.level_index(), groups.counts(), column, method))
        .collect()
}

fn check_shape<G: Grouping + ?Sized>(groups: &G, len: usize) -> Result<()> {
    if len != groups.num_obs() {
        return Err(Error::InputShape {
            expected: groups.num_obs(),
            actual: len,
        });
    }
    Ok(())
}

/// Every level must lie in `1..=num_levels` and `counts` must match a tally
/// of `level_index`
fn check_levels<G: Grouping + ?Sized>(groups: &G) -> Result<()> {
    let num_levels = groups.num_levels();
    let mut tally = vec![0usize; num_levels];
    for (obs, &level) in groups.level_index().iter().enumerate() {
        if level == 0 || level > num_levels {
            return Err(Error::InvalidLevel(format!(
                "observation {} has level {}, expected 1..={}",
                obs, level, num_levels
            )));
        }
        tally[level - 1] += 1;
    }
    if let Some(k) = (0..num_levels).find(|&k| tally[k] != groups.counts()[k]) {
        return Err(Error::InvalidLevel(format!(
            "level {} has {} observations but counts says {}",
            k + 1,
            tally[k],
            groups.counts()[k]
        )));
    }
    Ok(())
}

fn reduce(
    level_index: &[usize],
    counts: &[usize],
    measurements: &[f64],
    method: AggMethod,
) -> Result<Vec<f64>> {
    let num_levels = counts.len();

    match method {
        AggMethod::Sum => Ok(sum_by_level(level_index, measurements, num_levels)),
        AggMethod::Mean => {
            let sums = sum_by_level(level_index, measurements, num_levels);
            sums.iter()
                .zip(counts)
                .enumerate()
                .map(|(k, (&sum, &count))| {
                    if count == 0 {
                        Err(Error::Division(format!("level {} has no observations", k + 1)))
                    } else {
                        Ok(sum / count as f64)
                    }
                })
                .collect()
        }
        AggMethod::Count => Ok(counts.iter().map(|&c| c as f64).collect()),
        AggMethod::Min => Ok(extremum_by_level(
            level_index,
            measurements,
            num_levels,
            f64::INFINITY,
            |v, acc| v < acc,
        )),
        AggMethod::Max => Ok(extremum_by_level(
            level_index,
            measurements,
            num_levels,
            f64::NEG_INFINITY,
            |v, acc| v > acc,
        )),
    }
}

fn sum_by_level(level_index: &[usize], measurements: &[f64], num_levels: usize) -> Vec<f64> {
    let mut sums = vec![0.0; num_levels];
    for (&level, &value) in level_index.iter().zip(measurements) {
        sums[level - 1] += value;
    }
    sums
}

/// Running extremum per level; a NaN measurement makes its level NaN
fn extremum_by_level<F>(
    level_index: &[usize],
    measurements: &[f64],
    num_levels: usize,
    init: f64,
    better: F,
) -> Vec<f64>
where
    F: Fn(f64, f64) -> bool,
{
    let mut acc = vec![init; num_levels];
    for (&level, &value) in level_index.iter().zip(measurements) {
        let slot = &mut acc[level - 1];
        if value.is_nan() || better(value, *slot) {
            *slot = value;
        }
    }
    acc
}
