//! End-to-end tests of the library pipeline
//!
//! Covers normalization through Monte Carlo validation on small hand-built
//! corpora with fixed seeds.

use lyriclass::classifier::{
    evaluate, evaluate_split, most_informative_features, select_features, select_informative,
    EvalConfig, Featureset, MonteCarloValidator, ProbabilityTable,
};
use lyriclass::models::{Label, Track};
use lyriclass::pipeline::prepare;
use lyriclass::text::{vectorize, Normalizer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::num::NonZeroUsize;

fn scenario_a_tracks() -> Vec<Track> {
    vec![
        Track::new("0", "damn", true),
        Track::new("1", "hello", false),
        Track::new("2", "damn hell", true),
        Track::new("3", "sunshine", false),
    ]
}

/// 100 tracks, half explicit, with overlapping vocabulary so splits vary
fn hundred_tracks() -> Vec<Track> {
    let explicit_words = ["damn", "hell", "fight", "blood", "money"];
    let clean_words = ["love", "sun", "dance", "heart", "money"];
    let shared = ["night", "road", "home", "fire", "rain", "dream", "light"];
    (0..100)
        .map(|i| {
            let explicit = i % 2 == 0;
            let own = if explicit { &explicit_words } else { &clean_words };
            let mut words = vec![shared[i % shared.len()], shared[(i * 3 + 1) % shared.len()]];
            // Every fifth track borrows a word from the other class
            if i % 5 == 0 {
                let other = if explicit { &clean_words } else { &explicit_words };
                words.push(other[i % other.len()]);
            } else {
                words.push(own[i % own.len()]);
            }
            words.push(own[(i / 2) % own.len()]);
            Track::new(i.to_string(), words.join(" "), explicit)
        })
        .collect()
}

fn featuresets(tracks: &[Track]) -> Vec<Featureset> {
    prepare(tracks, &Normalizer::english()).unwrap().featuresets
}

#[test]
fn scenario_a_fixed_partition() {
    let tracks = scenario_a_tracks();
    let prepared = prepare(&tracks, &Normalizer::english()).unwrap();
    let again = prepare(&tracks, &Normalizer::english()).unwrap();

    assert_eq!(prepared.vocabulary, again.vocabulary);
    assert_eq!(
        prepared.vocabulary.tokens(),
        &["damn", "hell", "hello", "sunshin"]
    );
    assert!(prepared
        .featuresets
        .iter()
        .all(|s| s.features.len() == prepared.vocabulary.len()));

    let train: Vec<&Featureset> = prepared.featuresets[..3].iter().collect();
    let test: Vec<&Featureset> = prepared.featuresets[3..].iter().collect();
    let evaluation = evaluate_split(&train, &test, &EvalConfig::default()).unwrap();

    assert_eq!(evaluation.test_size, 1);
    assert_eq!(evaluation.metrics.total_support(), 1.0);
    assert_eq!(evaluation.metrics.support[Label::NotExplicit.index()], 1.0);
    assert_eq!(evaluation.confusion.total(), 1);
}

#[test]
fn scenario_b_top_two_of_five() {
    let docs = [
        "damn damn fire",
        "damn fire road",
        "love sun road",
        "love sun",
        "road fire",
        "sun love damn",
    ];
    let labels = [
        Label::Explicit,
        Label::Explicit,
        Label::NotExplicit,
        Label::NotExplicit,
        Label::Explicit,
        Label::NotExplicit,
    ];
    let out = vectorize(&docs);
    assert_eq!(out.vocabulary.len(), 5);
    let sets =
        lyriclass::classifier::build_featuresets(&out.vocabulary, &out.vectors, &labels).unwrap();

    let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
    let ranking = most_informative_features(&table, &out.vocabulary, 2);
    assert_eq!(ranking.len(), 2);

    let names: Vec<&str> = ranking.iter().map(|f| f.name.as_str()).collect();
    let by_name = select_features(&sets, &out.vocabulary, &names);
    let by_ranking = select_informative(&sets, &ranking);
    assert_eq!(by_name, by_ranking);

    for set in &by_ranking {
        assert_eq!(set.features.len(), 2);
        for id in set.features.ids() {
            let token = out.vocabulary.token(id).unwrap();
            assert!(names.contains(&token));
        }
    }
}

#[test]
fn scenario_c_monte_carlo_sanity_bound() {
    let sets = featuresets(&hundred_tracks());
    assert_eq!(sets.len(), 100);

    let report = MonteCarloValidator::new(NonZeroUsize::new(10).unwrap(), EvalConfig::default())
        .run(&sets, 2024)
        .unwrap();
    assert_eq!(report.runs.len(), 10);
    let spread = report.spread().unwrap();
    let bound = (report.runs.len() as f64).sqrt();

    for run in &report.runs {
        let arrays = run
            .named_arrays()
            .into_iter()
            .zip(report.mean.named_arrays())
            .zip(spread.std_dev.named_arrays());
        for (((name, values), (_, mean)), (_, std_dev)) in arrays {
            for i in 0..2 {
                let deviation = (values[i] - mean[i]).abs();
                assert!(
                    deviation <= bound * std_dev[i] + 1e-9,
                    "{name}[{i}] deviates {deviation} from mean {} (std {})",
                    mean[i],
                    std_dev[i]
                );
            }
        }
    }

    let means = report.mean.named_arrays();
    let mins = spread.min.named_arrays();
    let maxs = spread.max.named_arrays();
    for k in 0..4 {
        for i in 0..2 {
            assert!(means[k].1[i] >= mins[k].1[i] - 1e-12);
            assert!(means[k].1[i] <= maxs[k].1[i] + 1e-12);
        }
    }
    assert!((report.mean.total_support() - 25.0).abs() < 1e-9);
}

#[test]
fn single_repetition_equals_direct_evaluation() {
    let sets = featuresets(&hundred_tracks());
    let config = EvalConfig::default();
    let report = MonteCarloValidator::new(NonZeroUsize::new(1).unwrap(), config)
        .run(&sets, 77)
        .unwrap();
    let direct = evaluate(&sets, &config, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
    assert_eq!(report.mean, direct.metrics);
}

#[test]
fn metrics_stay_in_range() {
    let sets = featuresets(&hundred_tracks());
    for seed in 0..5 {
        let evaluation = evaluate(
            &sets,
            &EvalConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap();
        let m = evaluation.metrics;
        for values in [m.precision, m.recall, m.fscore] {
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        assert_eq!(m.total_support() as usize, evaluation.test_size);
        assert_eq!(evaluation.test_size, 25);
        assert_eq!(evaluation.train_size, 75);
    }
}

#[test]
fn normalization_is_idempotent_over_tracks() {
    let normalizer = Normalizer::english();
    for track in hundred_tracks() {
        let once = normalizer.normalize(&track.lyrics);
        assert_eq!(normalizer.normalize(&once), once);
    }
}

#[test]
fn reduced_featuresets_respect_bound() {
    let tracks = hundred_tracks();
    let prepared = prepare(&tracks, &Normalizer::english()).unwrap();
    let evaluation = evaluate(
        &prepared.featuresets,
        &EvalConfig::default(),
        &mut ChaCha8Rng::seed_from_u64(5),
    )
    .unwrap();
    for k in [1, 3, 8, 1000] {
        let ranking = most_informative_features(evaluation.classifier.table(), &prepared.vocabulary, k);
        let reduced = select_informative(&prepared.featuresets, &ranking);
        assert_eq!(reduced.len(), prepared.featuresets.len());
        assert!(reduced.iter().all(|s| s.features.len() <= k));
    }
}
