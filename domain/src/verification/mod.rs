//! Verification stage
//!
//! A [`Verifier`] runs a declared, ordered list of [`VerificationCheck`]s
//! against one ranked candidate. The first failing check decides the failure
//! reason and the remaining checks are skipped. Verification is a pure
//! function of the candidate and the caller-supplied [`VerificationContext`].

pub mod check;
pub mod checks;
pub mod context;
pub mod result;
pub mod verifier;

pub use check::{CheckOutcome, VerificationCheck};
pub use checks::{BlockedTerms, CheckSpec, MaxLength, MinConfidence, NonEmptyAnswer, ReferenceTerms};
pub use context::VerificationContext;
pub use result::{VerificationHistory, VerificationResult, Verdict};
pub use verifier::Verifier;
