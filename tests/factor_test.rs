mod common;

use ftools::{factorize, factorize_with, Error, Factor, FactorConfig, HashMethod, Scalar};

const METHODS: [HashMethod; 4] = [
    HashMethod::Auto,
    HashMethod::Hash0,
    HashMethod::Hash1,
    HashMethod::Hash2,
];

#[test]
fn test_factor_creation() {
    let values = vec!["a", "b", "a", "c", "b", "a"];
    let factor = Factor::new(&values, FactorConfig::default()).unwrap();

    assert_eq!(factor.num_obs(), 6);
    assert_eq!(factor.num_levels(), 3);
    assert_eq!(factor.keys().unwrap(), &["a", "b", "c"]);
    assert_eq!(factor.level_index(), &[1, 2, 1, 3, 2, 1]);
    assert_eq!(factor.counts(), &[3, 2, 1]);
}

#[test]
fn test_factor_string_keys() {
    let values: Vec<String> = vec!["z", "y", "z"].iter().map(|s| s.to_string()).collect();
    let factor = Factor::from_values(&values, true).unwrap();

    assert_eq!(factor.keys().unwrap(), &["y".to_string(), "z".to_string()]);
    assert_eq!(factor.level_index(), &[2, 1, 2]);
}

#[test]
fn test_factor_unsorted_uses_first_occurrence() {
    let values = vec!["b", "c", "b", "a"];
    for method in METHODS {
        let config = FactorConfig::new()
            .with_method(method)
            .with_sort_levels(false);
        let factor = Factor::new(&values, config).unwrap();

        assert_eq!(factor.keys().unwrap(), &["b", "c", "a"], "{}", method);
        assert_eq!(factor.level_index(), &[1, 2, 1, 3], "{}", method);
        assert_eq!(factor.counts(), &[2, 1, 1], "{}", method);
    }
}

#[test]
fn test_factor_empty_input() {
    let values: Vec<i64> = Vec::new();
    let factor = Factor::from_values(&values, true).unwrap();

    assert_eq!(factor.num_obs(), 0);
    assert_eq!(factor.num_levels(), 0);
    assert!(factor.counts().is_empty());
    assert_eq!(factor.keys().unwrap().len(), 0);
}

#[test]
fn test_factor_single_observation() {
    let factor = Factor::from_values(&[42], true).unwrap();

    assert_eq!(factor.num_levels(), 1);
    assert_eq!(factor.counts(), &[1]);
    assert_eq!(factor.level_index(), &[1]);
}

#[test]
fn test_partition_property() {
    let values = common::random_keys(5_000, 37, 7);
    let factor = Factor::from_values(&values, true).unwrap();

    let total: usize = factor.counts().iter().sum();
    assert_eq!(total, factor.num_obs());
    assert!(factor.counts().iter().all(|&c| c > 0));

    let mut seen = vec![false; factor.num_obs()];
    for (k, group) in factor.partition().iter().enumerate() {
        assert_eq!(group.len(), factor.counts()[k]);
        for &obs in group {
            assert!(!seen[obs], "observation {} in two levels", obs);
            seen[obs] = true;
            assert_eq!(factor.level_index()[obs], k + 1);
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_round_trip_property() {
    let values = common::random_string_keys(2_000, 50, 11);
    for sort_levels in [true, false] {
        let factor = Factor::from_values(&values, sort_levels).unwrap();
        let keys = factor.keys().unwrap();
        for (i, value) in values.iter().enumerate() {
            assert_eq!(&keys[factor.level_index()[i] - 1], value);
            assert_eq!(factor.value_at(i), Some(value));
        }
    }
}

#[test]
fn test_sorted_levels_are_strictly_ascending() {
    let values = common::random_keys(3_000, 200, 3);
    let factor = Factor::from_values(&values, true).unwrap();
    let keys = factor.keys().unwrap();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_idempotence() {
    let values = common::random_string_keys(1_000, 20, 5);
    for sort_levels in [true, false] {
        let first = factorize(&values, sort_levels);
        let second = factorize(&values, sort_levels);
        assert_eq!(first, second);
    }
}

#[test]
fn test_strategies_agree() {
    let values = common::random_keys(10_000, 500, 99);
    for sort_levels in [true, false] {
        let reference = factorize_with(&values, HashMethod::Hash1, sort_levels);
        for method in METHODS {
            let other = factorize_with(&values, method, sort_levels);
            assert_eq!(other, reference, "{} sort_levels={}", method, sort_levels);
        }
    }
}

#[test]
fn test_large_input() {
    // Large enough that a quadratic pass would not finish in time
    let values = common::random_keys(1_000_000, 10_000, 1);
    let factor = Factor::from_values(&values, true).unwrap();

    assert_eq!(factor.num_obs(), 1_000_000);
    assert!(factor.num_levels() <= 10_000);
    assert_eq!(factor.counts().iter().sum::<usize>(), 1_000_000);
}

#[test]
fn test_save_keys_false() {
    let config = FactorConfig::new().with_save_keys(false);
    let factor = Factor::new(&["p", "q", "p"], config).unwrap();

    assert!(factor.keys().is_none());
    assert_eq!(factor.num_levels(), 2);
    assert_eq!(factor.counts(), &[2, 1]);
}

#[test]
fn test_verbose_construction() {
    // The log line itself is checked in logging_test.rs
    let config = FactorConfig::new().with_verbose(true);
    let factor = Factor::new(&[3, 1, 3], config).unwrap();
    assert_eq!(factor.level_index(), &[2, 1, 2]);
}

#[test]
fn test_display() {
    let config = FactorConfig::new().with_method(HashMethod::Hash2);
    let factor = Factor::new(&["a", "b", "c", "a"], config).unwrap();
    assert_eq!(
        format!("{}", factor),
        "Factor(num_levels=3, num_obs=4, method='hash2')"
    );
}

#[test]
fn test_scalars_mixed_kinds_rejected() {
    let values = vec![Scalar::from("a"), Scalar::from(1i64), Scalar::from("b")];
    let result = Factor::from_scalars(&values, FactorConfig::default());
    assert!(matches!(result, Err(Error::TypeMismatch(_))));
}

#[test]
fn test_scalars_nested_rejected() {
    let values = vec![
        Scalar::from(1i64),
        Scalar::List(vec![Scalar::from(2i64), Scalar::from(3i64)]),
    ];
    let result = Factor::from_scalars(&values, FactorConfig::default());
    assert!(matches!(result, Err(Error::NotFlat(_))));
}

#[test]
fn test_scalars_bools() {
    let values = vec![Scalar::from(true), Scalar::from(false), Scalar::from(true)];
    let factor = Factor::from_scalars(&values, FactorConfig::default()).unwrap();
    assert_eq!(
        factor.keys().unwrap(),
        &[Scalar::Bool(false), Scalar::Bool(true)]
    );
    assert_eq!(factor.level_index(), &[2, 1, 2]);
}

#[test]
fn test_json_strings() {
    let factor =
        Factor::from_json(r#"["a", "b", "a", "c", "b", "a"]"#, FactorConfig::default()).unwrap();
    assert_eq!(factor.level_index(), &[1, 2, 1, 3, 2, 1]);
    assert_eq!(factor.counts(), &[3, 2, 1]);
    assert_eq!(factor.level_of(&Scalar::from("c")), Some(3));
}

#[test]
fn test_json_nested_rejected() {
    let result = Factor::from_json("[[1, 2], [3]]", FactorConfig::default());
    assert!(matches!(result, Err(Error::NotFlat(_))));

    let result = Factor::from_json(r#"[1, {"a": 2}]"#, FactorConfig::default());
    assert!(matches!(result, Err(Error::NotFlat(_))));
}

#[test]
fn test_json_mixed_rejected() {
    let result = Factor::from_json(r#"[1, "a"]"#, FactorConfig::default());
    assert!(matches!(result, Err(Error::TypeMismatch(_))));
}
