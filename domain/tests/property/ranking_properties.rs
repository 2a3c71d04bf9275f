use chrono::{TimeZone, Utc};
use ensemble_domain::ranking::compare_scored;
use ensemble_domain::{
    Candidate, PriorityFirst, Ranker, ScoringPolicy, SpecialistDescriptor, SpecialistReply,
    WeightedConfidence,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Small value pools so that ties on every key are common
fn candidate_params() -> impl Strategy<Value = (f64, Option<f64>, u64)> {
    (
        prop::sample::select(vec![0.5, 1.0, 2.0]),
        prop::option::of(prop::sample::select(vec![0.25, 0.5, 1.0])),
        prop::sample::select(vec![10u64, 20, 30]),
    )
}

fn build(params: &[(f64, Option<f64>, u64)]) -> Vec<Candidate> {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    params
        .iter()
        .enumerate()
        .map(|(i, (weight, confidence, latency))| {
            let descriptor = SpecialistDescriptor::new(format!("s{:02}", i), "logic", "static:x")
                .with_weight(*weight);
            let mut reply = SpecialistReply::new(format!("answer {}", i));
            reply.confidence = *confidence;
            Candidate::new(&descriptor, reply, Duration::from_millis(*latency), ts)
        })
        .collect()
}

fn order(ranker: &Ranker, candidates: Vec<Candidate>) -> Vec<String> {
    ranker
        .rank(candidates)
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect()
}

fn policies() -> Vec<Arc<dyn ScoringPolicy>> {
    vec![
        Arc::new(PriorityFirst::default()),
        Arc::new(WeightedConfidence::default()),
    ]
}

proptest! {
    #[test]
    fn ranking_ignores_arrival_order(
        (params, perm) in prop::collection::vec(candidate_params(), 1..8)
            .prop_flat_map(|p| {
                let idx: Vec<usize> = (0..p.len()).collect();
                (Just(p), Just(idx).prop_shuffle())
            })
    ) {
        let ranker = Ranker::default();
        let candidates = build(&params);
        let shuffled: Vec<Candidate> = perm.iter().map(|&i| candidates[i].clone()).collect();
        prop_assert_eq!(order(&ranker, candidates), order(&ranker, shuffled));
    }

    #[test]
    fn ranking_is_repeatable(params in prop::collection::vec(candidate_params(), 1..8)) {
        let ranker = Ranker::default();
        let first = order(&ranker, build(&params));
        for _ in 0..3 {
            prop_assert_eq!(&first, &order(&ranker, build(&params)));
        }
    }

    #[test]
    fn ranks_are_dense_and_weights_non_increasing(params in prop::collection::vec(candidate_params(), 1..8)) {
        let ranked = Ranker::default().rank(build(&params)).unwrap();
        for (i, r) in ranked.iter().enumerate() {
            prop_assert_eq!(r.rank(), i + 1);
        }
        for pair in ranked.windows(2) {
            let (a, b) = (pair[0].candidate(), pair[1].candidate());
            prop_assert!(a.weight() >= b.weight());
            if a.weight() == b.weight() {
                prop_assert!(pair[0].score() >= pair[1].score());
            }
        }
    }

    #[test]
    fn weighted_scores_non_increasing(params in prop::collection::vec(candidate_params(), 1..8)) {
        let ranker = Ranker::new(Arc::new(WeightedConfidence::default()));
        let ranked = ranker.rank(build(&params)).unwrap();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn comparator_is_antisymmetric(params in prop::collection::vec(candidate_params(), 2..6)) {
        let candidates = build(&params);
        for policy in policies() {
            let policy = policy.as_ref();
            for a in &candidates {
                for b in &candidates {
                    let (sa, sb) = (policy.score(a), policy.score(b));
                    let ab = compare_scored(policy, a, sa, b, sb);
                    let ba = compare_scored(policy, b, sb, a, sa);
                    prop_assert_eq!(ab, ba.reverse());
                    if a.id() != b.id() {
                        prop_assert_ne!(ab, Ordering::Equal);
                    }
                }
            }
        }
    }

    #[test]
    fn comparator_is_transitive(params in prop::collection::vec(candidate_params(), 3..6)) {
        let candidates = build(&params);
        for policy in policies() {
            let policy = policy.as_ref();
            let cmp = |x: &Candidate, y: &Candidate| {
                compare_scored(policy, x, policy.score(x), y, policy.score(y))
            };
            for a in &candidates {
                for b in &candidates {
                    for c in &candidates {
                        if cmp(a, b) == Ordering::Less && cmp(b, c) == Ordering::Less {
                            prop_assert_eq!(cmp(a, c), Ordering::Less);
                        }
                    }
                }
            }
        }
    }
}
