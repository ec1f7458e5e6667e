//! Unit tests for the fold abstraction: terminal folds, composition
//! operators, resumable runs, scans, and the incremental driver.

#![allow(clippy::float_cmp)]

use super::scan::{postscan, scan};
use super::stats::{Length, Maximum, Mean, Minimum, Product, StdDev, Sum, ToVec, Variance};
use super::{
    distribute, duplicate, fold_with, lfilter, lmap, partition_by, run, tee, unzip_with, Branch,
    Driver,
};

#[test]
fn test_sum() {
    assert_eq!(run(Sum::new(), [1i64, 2, 3, 4, 5]), 15);
    assert_eq!(run(Sum::<i64>::new(), []), 0);
    assert_eq!(run(Sum::new(), [1.5f64, 2.5]), 4.0);
}

#[test]
fn test_length() {
    assert_eq!(run(Length::new(), ["a", "b", "c"]), 3);
    assert_eq!(run(Length::<i32>::new(), []), 0);
}

#[test]
fn test_product() {
    assert_eq!(run(Product::new(), [2i64, 3, 4]), 24);
    assert_eq!(run(Product::<i64>::new(), []), 1);
}

#[test]
fn test_minimum_maximum() {
    assert_eq!(run(Minimum::new(), [3, 1, 4, 1, 5]), Some(1));
    assert_eq!(run(Maximum::new(), [3, 1, 4, 1, 5]), Some(5));
    assert_eq!(run(Minimum::<i32>::new(), []), None);
    assert_eq!(run(Maximum::<i32>::new(), []), None);
}

#[test]
fn test_to_vec_preserves_order() {
    assert_eq!(run(ToVec::new(), [3, 1, 2]), vec![3, 1, 2]);
}

#[test]
fn test_fold_with_closures() {
    let joined = fold_with(
        String::new,
        |mut acc: String, word: &str| {
            acc.push_str(word);
            acc
        },
        |acc| acc,
    );
    assert_eq!(run(joined, ["a", "b", "c"]), "abc");
}

#[test]
fn test_mean() {
    assert_eq!(run(Mean::new(), [1.0, 2.0, 3.0, 4.0]), 2.5);
    assert!(run(Mean::new(), []).is_nan());
}

#[test]
fn test_variance_known_population() {
    // Population variance of [2,4,4,4,5,5,7,9] is exactly 4.
    let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let var = run(Variance::new(), xs);
    assert!((var - 4.0).abs() < 1e-12, "variance was {var}");
    let sd = run(StdDev::new(), xs);
    assert!((sd - 2.0).abs() < 1e-12, "stddev was {sd}");
}

#[test]
fn test_variance_order_invariance() {
    let forward = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let mut reversed = forward;
    reversed.reverse();
    let a = run(Variance::new(), forward);
    let b = run(Variance::new(), reversed);
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_variance_empty_is_nan() {
    assert!(run(Variance::new(), []).is_nan());
}

#[test]
fn test_tee_matches_individual_runs() {
    let xs = [1i64, 2, 3, 4, 5, 6, 7];
    let (total, count) = run(tee(Sum::new(), Length::new()), xs);
    assert_eq!(total, run(Sum::new(), xs));
    assert_eq!(count, run(Length::new(), xs));
}

#[test]
fn test_tee_heterogeneous_accumulators() {
    // A float fold and an integer-count fold pair into one fold without
    // either accumulator type leaking into the composition site.
    let (mean, n) = run(tee(Mean::new(), Length::new()), [1.0, 2.0, 3.0]);
    assert_eq!(mean, 2.0);
    assert_eq!(n, 3);
}

#[test]
fn test_distribute_output_order() {
    let folds = vec![Sum::new(), Sum::new(), Sum::new()];
    let outs = run(distribute(folds), [1i64, 2, 3]);
    assert_eq!(outs, vec![6, 6, 6]);
}

#[test]
fn test_distribute_empty_list() {
    let outs = run(distribute(Vec::<Sum<i64>>::new()), [1i64, 2, 3]);
    assert_eq!(outs, Vec::<i64>::new());
}

#[test]
fn test_partition_by_predicate() {
    let split = partition_by(
        |x: i64| {
            if x % 2 == 0 {
                Branch::Left(x)
            } else {
                Branch::Right(x)
            }
        },
        Sum::new(),
        Sum::new(),
    );
    let (evens, odds) = run(split, [1i64, 2, 3, 4, 5, 6]);
    assert_eq!(evens, 12);
    assert_eq!(odds, 9);
}

#[test]
fn test_partition_by_stateful_round_robin() {
    // The classifier is FnMut: a round-robin router needs no foreknowledge
    // of how many elements land on each side.
    let mut flip = false;
    let split = partition_by(
        move |x: i64| {
            flip = !flip;
            if flip {
                Branch::Left(x)
            } else {
                Branch::Right(x)
            }
        },
        ToVec::new(),
        ToVec::new(),
    );
    let (left, right) = run(split, [1i64, 2, 3, 4, 5]);
    assert_eq!(left, vec![1, 3, 5]);
    assert_eq!(right, vec![2, 4]);
}

#[test]
fn test_unzip_with_feeds_both_parts() {
    let pairs = [(1i64, 10i64), (2, 20), (3, 30)];
    let (firsts, seconds) = run(
        unzip_with(|(a, b)| (a, b), Sum::new(), Sum::new()),
        pairs,
    );
    assert_eq!(firsts, 6);
    assert_eq!(seconds, 60);
}

#[test]
fn test_lmap_transforms_input_side() {
    let doubled = lmap(|x: i64| x * 2, Sum::new());
    assert_eq!(run(doubled, [1i64, 2, 3]), 12);
}

#[test]
fn test_lfilter_skips_elements() {
    let positives = lfilter(|x: &i64| *x > 0, Sum::new());
    assert_eq!(run(positives, [1i64, -2, 3, -4, 5]), 9);
}

#[test]
fn test_duplicate_resume_equals_single_run() {
    let xs1 = [1i64, 2, 3];
    let xs2 = [4i64, 5, 6, 7];
    let whole: Vec<i64> = xs1.iter().chain(xs2.iter()).copied().collect();

    let resumed = run(duplicate(Sum::new()), xs1);
    assert_eq!(run(resumed, xs2), run(Sum::new(), whole));
}

#[test]
fn test_duplicate_resume_with_vec_accumulator() {
    let resumed = run(duplicate(ToVec::new()), ["a", "b"]);
    assert_eq!(run(resumed, ["c"]), vec!["a", "b", "c"]);
}

#[test]
fn test_duplicate_snapshot_is_reusable() {
    // The frozen continuation seeds every run from the same snapshot.
    let resumed = run(duplicate(Sum::new()), [10i64]);
    assert_eq!(run(resumed.clone(), [1i64]), 11);
    assert_eq!(run(resumed, [2i64]), 12);
}

#[test]
fn test_scan_includes_baseline() {
    let running: Vec<i64> = scan(Sum::new(), [1i64, 2, 3]).collect();
    assert_eq!(running, [0, 1, 3, 6]);
}

#[test]
fn test_scan_of_empty_input_is_baseline_only() {
    let running: Vec<i64> = scan(Sum::new(), []).collect();
    assert_eq!(running, [0]);
}

#[test]
fn test_postscan_omits_baseline() {
    let running: Vec<i64> = postscan(Sum::new(), [1i64, 2, 3]).collect();
    assert_eq!(running, [1, 3, 6]);

    let empty: Vec<i64> = postscan(Sum::new(), []).collect();
    assert!(empty.is_empty());
}

#[test]
fn test_scan_aligns_with_input_stream() {
    let lens: Vec<u64> = scan(Length::new(), "rill".chars()).collect();
    assert_eq!(lens, [0, 1, 2, 3, 4]);
}

#[test]
fn test_driver_incremental_feeding() {
    let mut driver = Driver::new(Sum::new());
    driver.push(1i64);
    driver.extend([2, 3]);
    assert_eq!(driver.snapshot(), 6);
    driver.push(4);
    assert_eq!(driver.finish(), 10);
    // Finishing re-seeds: the driver starts a fresh run.
    driver.push(100);
    assert_eq!(driver.finish(), 100);
}

#[test]
fn test_composition_nests() {
    // tee over a partition and a filtered sum, all over one pass.
    let inner = partition_by(
        |x: i64| {
            if x < 0 {
                Branch::Left(x)
            } else {
                Branch::Right(x)
            }
        },
        Length::new(),
        Length::new(),
    );
    let outer = tee(inner, lfilter(|x: &i64| *x > 2, Sum::new()));
    let ((negatives, positives), big_sum) = run(outer, [-1i64, 2, -3, 4, 5]);
    assert_eq!(negatives, 2);
    assert_eq!(positives, 3);
    assert_eq!(big_sum, 9);
}
