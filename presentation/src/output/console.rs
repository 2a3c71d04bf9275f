//! Console output formatter for query reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use ensemble_domain::{ErrorPayload, QueryOutcome, QueryReport, Verdict};

/// Formats query reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn terminal colors off for the rest of the process when disabled
    /// in config. `NO_COLOR` and `CLICOLOR` are honored either way.
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format the complete report: answer, evidence, failures, attempts
    pub fn format(report: &QueryReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Ensemble Governor"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), report.query));
        output.push_str(&format!(
            "{} {}\n",
            "Correlation:".cyan().bold(),
            report.correlation_id
        ));
        output.push_str(&format!(
            "{} {} in {}ms\n",
            "Finished:".cyan().bold(),
            report.final_state,
            report.elapsed_ms
        ));

        match &report.outcome {
            QueryOutcome::Answered(response) => {
                output.push_str(&Self::section_header("Answer"));
                output.push_str(&format!("\n{}\n", response.answer));
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Built from:".dimmed(),
                    response
                        .built_from
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));

                output.push_str(&Self::section_header("Evidence"));
                for entry in &response.evidence {
                    let marker = if entry.included {
                        "*".green().bold()
                    } else {
                        " ".normal()
                    };
                    let verdict = match entry.verdict {
                        Some(Verdict::Pass) => "pass".green(),
                        Some(Verdict::Fail) => "fail".red(),
                        None => "-".dimmed(),
                    };
                    output.push_str(&format!(
                        "{} #{:<2} {:<20} score {:.3}  verdict {}\n",
                        marker, entry.rank, entry.specialist_id, entry.score, verdict
                    ));
                }
            }
            QueryOutcome::Failed(error) => {
                output.push_str(&Self::section_header("Error"));
                output.push_str(&format!("\n{}\n", Self::error_line(error)));
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&Self::section_header("Specialist Failures"));
            for (id, kind) in &report.failures {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    id.to_string().yellow(),
                    kind
                ));
            }
        }

        if !report.verification.is_empty() {
            output.push_str(&Self::section_header("Verification Attempts"));
            for (attempt, result) in report.verification.iter().enumerate() {
                let status = match result.verdict {
                    Verdict::Pass => "v".green(),
                    Verdict::Fail => "x".red(),
                };
                output.push_str(&format!(
                    "  {} {}. {} (confidence {:.2})",
                    status,
                    attempt + 1,
                    result.candidate_id,
                    result.confidence
                ));
                if let Some(reason) = &result.failure_reason {
                    let check = result.failed_check.as_deref().unwrap_or("check");
                    output.push_str(&format!(" [{}] {}", check, reason));
                }
                output.push('\n');
            }
        }

        output.push_str(&Self::section_header("Transitions"));
        for transition in &report.transitions {
            output.push_str(&format!(
                "  {:>6}ms  {} -> {}",
                transition.elapsed_ms, transition.from, transition.to
            ));
            if let Some(reason) = &transition.reason {
                output.push_str(&format!("  {}", reason.dimmed()));
            }
            output.push('\n');
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &QueryReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Final answer only (concise output)
    pub fn format_answer_only(report: &QueryReport) -> String {
        match &report.outcome {
            QueryOutcome::Answered(response) => response.answer.clone(),
            QueryOutcome::Failed(error) => Self::error_line(error),
        }
    }

    fn error_line(error: &ErrorPayload) -> String {
        let mut line = format!("{} [{}] {}", "Error".red().bold(), error.code, error.reason);
        if let Some(stage) = error.stage_reached {
            line.push_str(&format!(" (reached {})", stage.display_name()));
        }
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, report: &QueryReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &QueryReport) -> String {
        Self::format_json(report)
    }

    fn format_answer(&self, report: &QueryReport) -> String {
        Self::format_answer_only(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::{
        CorrelationId, ErrorCode, EvidenceEntry, FailureKind, GovernorState, OutputFormat,
        SpecialistId, SynthesizedResponse, TransitionRecord, VerificationHistory,
        VerificationResult,
    };
    use std::collections::BTreeMap;

    fn answered_report() -> QueryReport {
        let mut verification = VerificationHistory::new();
        verification.record(VerificationResult {
            candidate_id: SpecialistId::new("alpha"),
            verdict: Verdict::Fail,
            failure_reason: Some("contains blocked term 'unsure'".into()),
            failed_check: Some("blocked_terms".into()),
            confidence: 0.5,
        });
        verification.record(VerificationResult {
            candidate_id: SpecialistId::new("beta"),
            verdict: Verdict::Pass,
            failure_reason: None,
            failed_check: None,
            confidence: 1.0,
        });

        let mut failures = BTreeMap::new();
        failures.insert(SpecialistId::new("gamma"), FailureKind::Timeout);

        QueryReport {
            correlation_id: CorrelationId::new("c-42"),
            query: "capital of France?".into(),
            outcome: QueryOutcome::Answered(SynthesizedResponse {
                answer: "Paris".into(),
                built_from: vec![SpecialistId::new("beta")],
                evidence: vec![
                    EvidenceEntry {
                        specialist_id: SpecialistId::new("alpha"),
                        score: 0.9,
                        rank: 1,
                        included: false,
                        verdict: Some(Verdict::Fail),
                    },
                    EvidenceEntry {
                        specialist_id: SpecialistId::new("beta"),
                        score: 0.8,
                        rank: 2,
                        included: true,
                        verdict: Some(Verdict::Pass),
                    },
                ],
            }),
            final_state: GovernorState::Done,
            attempts: 2,
            verification,
            failures,
            transitions: vec![TransitionRecord {
                from: GovernorState::Dispatching,
                to: GovernorState::Ranking,
                elapsed_ms: 12,
                reason: Some("2 candidates, 1 failures".into()),
            }],
            elapsed_ms: 15,
        }
    }

    fn failed_report() -> QueryReport {
        QueryReport {
            correlation_id: CorrelationId::new("c-43"),
            query: "q".into(),
            outcome: QueryOutcome::Failed(ErrorPayload {
                code: ErrorCode::NoVerifiedCandidate,
                reason: "all 2 candidates rejected".into(),
                stage_reached: Some(GovernorState::Verifying),
            }),
            final_state: GovernorState::Failed,
            attempts: 2,
            verification: VerificationHistory::new(),
            failures: BTreeMap::new(),
            transitions: vec![],
            elapsed_ms: 7,
        }
    }

    #[test]
    fn test_answer_only_prints_answer_text() {
        assert_eq!(ConsoleFormatter::format_answer_only(&answered_report()), "Paris");
    }

    #[test]
    fn test_answer_only_prints_error_code_for_failures() {
        let text = ConsoleFormatter::format_answer_only(&failed_report());
        assert!(text.contains("no_verified_candidate"));
        assert!(text.contains("all 2 candidates rejected"));
        assert!(text.contains("Verification"));
    }

    #[test]
    fn test_full_lists_evidence_failures_and_attempts() {
        let text = ConsoleFormatter::format(&answered_report());
        assert!(text.contains("capital of France?"));
        assert!(text.contains("c-42"));
        assert!(text.contains("Paris"));
        assert!(text.contains("alpha"));
        assert!(text.contains("gamma"));
        assert!(text.contains("timed out"));
        assert!(text.contains("contains blocked term 'unsure'"));
        assert!(text.contains("2 candidates, 1 failures"));
    }

    #[test]
    fn test_json_is_the_whole_report() {
        let text = ConsoleFormatter.render(&answered_report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcome"]["status"], "answered");
        assert_eq!(value["outcome"]["answer"], "Paris");
        assert_eq!(value["attempts"], 2);
    }
}
