use std::collections::HashMap;

use hashspread::{
    aggregate, analyze, compare, conduct_analysis, from_fn, generate, map_to_buckets,
    AnalysisConfig, AnalysisError, BucketTable, CandidateStatistics, FoldHash, HashCandidate,
    Metric, Sdbm, Sha256Digits, Stage,
};

#[test]
fn generator_mapper_aggregator_compose() {
    let inputs = generate(100).unwrap();
    let m = map_to_buckets(&Sdbm, inputs, 100).unwrap();
    assert_eq!(m.table.total(), 100);

    let stats = aggregate(&m.table, m.collisions, m.total_step_distance, 100).unwrap();
    assert_eq!(stats.collisions, m.collisions);
    assert_eq!(stats.mean_step_distance, m.total_step_distance as f64 / 100.0);
    assert_eq!(stats, analyze(&Sdbm, &AnalysisConfig::new(100)).unwrap());
}

#[test]
fn uniform_table_scenario() {
    // Sends the i-th generated input to bucket i % 4.
    let order: HashMap<String, u64> = generate(100).unwrap().zip(0..).collect();
    let round_robin = from_fn("round-robin", move |s: &str| order[s]);

    let m = map_to_buckets(&round_robin, generate(100).unwrap(), 4).unwrap();
    assert_eq!(m.table.counts(), [25, 25, 25, 25]);
    assert_eq!(m.collisions, 96);
    // 75 steps of 1 and 24 wraps from 3 back to 0.
    assert_eq!(m.total_step_distance, 75 + 24 * 3);

    let stats = aggregate(&m.table, m.collisions, m.total_step_distance, 100).unwrap();
    assert_eq!(stats.divergence, 0.0);
    assert_eq!(stats.mean_step_distance, 1.47);

    let table = BucketTable::from_counts(vec![25, 25, 25, 25]).unwrap();
    assert_eq!(aggregate(&table, 96, 147, 100).unwrap(), stats);
}

#[test]
fn sha256_baseline_spreads_better_than_letter_sum() {
    let config = AnalysisConfig::new(5000);
    let report = conduct_analysis(&hashspread::LetterSum, &config).unwrap();

    // The letter sum of strings up to three letters never exceeds 75, so
    // almost every input collides.
    let user = report.user().unwrap();
    assert!(user.stats.collisions > 4900);
    assert!(report.ratio(Metric::Divergence, "SHA256").unwrap() > 1.0);
    assert_eq!(report.ratio(Metric::Divergence, "basic"), Some(1.0));
}

#[test]
fn foldhash_behaves_like_random_placement() {
    let config = AnalysisConfig::new(20_000);
    let fold = analyze(&FoldHash::quality(0), &config).unwrap();

    // Random placement of n balls into n bins leaves about n/e bins empty.
    let expected_collisions = 20_000.0 / std::f64::consts::E;
    let c = fold.collisions as f64;
    assert!((c - expected_collisions).abs() < 0.05 * expected_collisions, "{c}");

    // The SHA-256 numeral favors digits 0-5, so its low decimal digits are
    // skewed and it spreads worse than a well-mixed 64-bit hash.
    let sha = analyze(&Sha256Digits, &config).unwrap();
    assert!(sha.collisions > fold.collisions);

    let report = compare(&fold, &[CandidateStatistics::new("SHA256", sha)]);
    let ratio = report.ratio(Metric::Divergence, "SHA256").unwrap();
    assert!(ratio < 1.0, "{ratio}");
}

#[test]
fn errors_name_their_stage() {
    let err = analyze(&Sdbm, &AnalysisConfig::new(0)).unwrap_err();
    assert_eq!(err.stage(), Stage::Generation);
    assert!(err.to_string().starts_with("generation:"));

    let err = analyze(&Sdbm, &AnalysisConfig::new(10).with_bucket_count(0)).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidArgument {
            name: "bucket_count",
            ..
        }
    ));
}

#[test]
fn trait_objects_are_candidates() {
    let candidates: Vec<Box<dyn HashCandidate>> = vec![
        Box::new(Sdbm),
        Box::new(from_fn("len", |s: &str| s.len() as u64)),
    ];
    for c in &candidates {
        let stats = analyze(c, &AnalysisConfig::new(64)).unwrap();
        assert!((stats.pmf.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
