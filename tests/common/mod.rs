//! Common test utilities
//!
//! Provides shared helpers for the integration tests:
//! - Seeded random data generation
//! - Temporary configuration files

#![allow(dead_code)]

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

/// Random integer keys drawn from `0..num_keys`
pub fn random_keys(len: usize, num_keys: i64, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..num_keys)).collect()
}

/// Random string keys such as `"key_17"`
pub fn random_string_keys(len: usize, num_keys: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| format!("key_{}", rng.random_range(0..num_keys)))
        .collect()
}

/// Random measurements in `-100.0..100.0`
pub fn random_measurements(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-100.0..100.0)).collect()
}

/// Write `contents` to a temporary `.toml` file, removed on drop
pub fn temp_config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("ftools_test_")
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Assert two float slices are equal within `tol`
pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length differs");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "index {}: {} is not within {} of {}",
            i,
            a,
            tol,
            e
        );
    }
}
