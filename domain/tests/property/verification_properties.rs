use chrono::Utc;
use ensemble_domain::{
    Candidate, CheckSpec, RankedCandidate, SpecialistDescriptor, SpecialistReply,
    VerificationContext, Verifier,
};
use proptest::prelude::*;
use std::time::Duration;

fn verifier() -> Verifier {
    Verifier::from_specs(&[
        CheckSpec::NonEmpty,
        CheckSpec::MinConfidence {
            threshold: 0.3,
            require_reported: false,
        },
        CheckSpec::BlockedTerms {
            terms: vec!["forbidden".to_string()],
        },
        CheckSpec::MaxLength { max_chars: 40 },
        CheckSpec::ReferenceTerms,
    ])
}

proptest! {
    #[test]
    fn same_input_same_verdict(
        answer in "[a-z ]{0,60}",
        confidence in prop::option::of(0.0f64..=1.0),
        terms in prop::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let descriptor = SpecialistDescriptor::new("s", "logic", "static:x");
        let mut reply = SpecialistReply::new(answer);
        reply.confidence = confidence;
        let candidate = RankedCandidate::new(
            Candidate::new(&descriptor, reply, Duration::from_millis(1), Utc::now()),
            0.5,
            1,
        );
        let context = VerificationContext::new().with_reference_terms(terms);
        let verifier = verifier();

        let first = verifier.verify(&candidate, &context);
        for _ in 0..5 {
            prop_assert_eq!(&first, &verifier.verify(&candidate, &context));
        }
        prop_assert!((0.0..=1.0).contains(&first.confidence));
    }
}
