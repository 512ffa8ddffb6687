//! Distinct-value coding
//!
//! Each strategy first assigns 0-based codes in whatever order is cheapest for
//! it, then remaps them so that code order matches the requested level order:
//! natural ordering of the values when `sort_levels` is set, first occurrence
//! in the input otherwise. The final pass converts codes to 1-based level
//! numbers and tallies counts.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::collapse::Grouping;
use crate::config::HashMethod;

/// Result of factorizing a sequence of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAssignment<T> {
    /// Distinct values, position `k - 1` holds level `k`
    levels: Vec<T>,
    /// 1-based level of each observation
    level_index: Vec<usize>,
    /// Observations per level
    counts: Vec<usize>,
}

impl<T> LevelAssignment<T> {
    /// Distinct values in level order
    pub fn levels(&self) -> &[T] {
        &self.levels
    }

    /// 1-based level number of each observation
    pub fn level_index(&self) -> &[usize] {
        &self.level_index
    }

    /// Number of observations in each level
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of observations
    pub fn num_obs(&self) -> usize {
        self.level_index.len()
    }

    /// Number of distinct values
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Split into `(levels, level_index, counts)`
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>, Vec<usize>) {
        (self.levels, self.level_index, self.counts)
    }
}

impl<T> Grouping for LevelAssignment<T> {
    fn level_index(&self) -> &[usize] {
        &self.level_index
    }

    fn counts(&self) -> &[usize] {
        &self.counts
    }
}

/// Factorize `values` with the default strategy
///
/// # Arguments
/// * `values` - Observations to encode
/// * `sort_levels` - Order levels by value; otherwise by first occurrence
pub fn factorize<T>(values: &[T], sort_levels: bool) -> LevelAssignment<T>
where
    T: Ord + Hash + Clone,
{
    factorize_with(values, HashMethod::Auto, sort_levels)
}

/// Factorize `values` with an explicit strategy
///
/// Every strategy yields the same assignment for the same input and
/// `sort_levels` setting.
pub fn factorize_with<T>(values: &[T], method: HashMethod, sort_levels: bool) -> LevelAssignment<T>
where
    T: Ord + Hash + Clone,
{
    let (levels, codes) = match method.resolve() {
        HashMethod::Hash0 => code_by_sorting(values, sort_levels),
        HashMethod::Hash2 => code_by_ordered_map(values, sort_levels),
        _ => code_by_hashing(values, sort_levels),
    };

    let mut counts = vec![0usize; levels.len()];
    let level_index = codes
        .into_iter()
        .map(|code| {
            counts[code] += 1;
            code + 1
        })
        .collect();

    LevelAssignment {
        levels,
        level_index,
        counts,
    }
}

/// Sort a permutation of observation positions and cut it into runs
fn code_by_sorting<T>(values: &[T], sort_levels: bool) -> (Vec<T>, Vec<usize>)
where
    T: Ord + Clone,
{
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Stable, so the head of each run is that value's first occurrence
    order.sort_by(|&a, &b| values[a].cmp(&values[b]));

    let mut codes = vec![0usize; values.len()];
    let mut levels: Vec<&T> = Vec::new();
    let mut first_seen: Vec<usize> = Vec::new();

    for (pos, &obs) in order.iter().enumerate() {
        if pos == 0 || values[order[pos - 1]] != values[obs] {
            levels.push(&values[obs]);
            first_seen.push(obs);
        }
        codes[obs] = levels.len() - 1;
    }

    if sort_levels {
        return (levels.into_iter().cloned().collect(), codes);
    }

    let mut perm: Vec<usize> = (0..levels.len()).collect();
    perm.sort_unstable_by_key(|&code| first_seen[code]);
    let levels = apply_permutation(&levels, &perm, &mut codes);
    (levels, codes)
}

/// Hash map coding in first-occurrence order
fn code_by_hashing<T>(values: &[T], sort_levels: bool) -> (Vec<T>, Vec<usize>)
where
    T: Ord + Hash + Clone,
{
    let mut map: HashMap<&T, usize> = HashMap::new();
    let mut levels: Vec<&T> = Vec::new();
    let mut codes = Vec::with_capacity(values.len());

    for value in values {
        let code = *map.entry(value).or_insert_with(|| {
            levels.push(value);
            levels.len() - 1
        });
        codes.push(code);
    }

    if !sort_levels {
        return (levels.into_iter().cloned().collect(), codes);
    }

    let mut perm: Vec<usize> = (0..levels.len()).collect();
    perm.sort_unstable_by(|&a, &b| levels[a].cmp(levels[b]));
    let levels = apply_permutation(&levels, &perm, &mut codes);
    (levels, codes)
}

/// Ordered map coding; iterating the map gives the sorted permutation
fn code_by_ordered_map<T>(values: &[T], sort_levels: bool) -> (Vec<T>, Vec<usize>)
where
    T: Ord + Clone,
{
    let mut map: BTreeMap<&T, usize> = BTreeMap::new();
    let mut levels: Vec<&T> = Vec::new();
    let mut codes = Vec::with_capacity(values.len());

    for value in values {
        let code = *map.entry(value).or_insert_with(|| {
            levels.push(value);
            levels.len() - 1
        });
        codes.push(code);
    }

    if !sort_levels {
        return (levels.into_iter().cloned().collect(), codes);
    }

    let perm: Vec<usize> = map.into_values().collect();
    let levels = apply_permutation(&levels, &perm, &mut codes);
    (levels, codes)
}

/// Reorder levels so that new code `i` is old code `perm[i]`, rewriting `codes`
fn apply_permutation<T: Clone>(levels: &[&T], perm: &[usize], codes: &mut [usize]) -> Vec<T> {
    let mut new_code = vec![0usize; perm.len()];
    for (new, &old) in perm.iter().enumerate() {
        new_code[old] = new;
    }
    for code in codes.iter_mut() {
        *code = new_code[*code];
    }
    perm.iter().map(|&old| levels[old].clone()).collect()
}
