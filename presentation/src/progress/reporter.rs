//! Progress reporting while a query moves through the governor

use colored::Colorize;
use ensemble_application::PipelineObserver;
use ensemble_domain::{GovernorState, QueryReport, SpecialistId, Verdict, VerificationResult};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one indicatif bar per governor stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<(GovernorState, ProgressBar)>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Reporter drawing to an arbitrary target (hidden in tests)
    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: GovernorState) -> &'static str {
        match stage {
            GovernorState::Dispatching => "Dispatching to specialists",
            GovernorState::Ranking => "Ranking candidates",
            GovernorState::Verifying => "Verifying",
            GovernorState::Synthesizing => "Synthesizing",
            GovernorState::Done | GovernorState::Failed => "Finished",
        }
    }

    fn finish_current(&self) {
        let current = self.stage_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some((stage, pb)) = current {
            pb.finish_with_message(format!("{} complete", stage.display_name().green()));
        }
    }

    #[cfg(test)]
    fn position(&self) -> Option<(GovernorState, u64)> {
        self.stage_bar
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(stage, pb)| (*stage, pb.position())))
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ProgressReporter {
    fn on_stage(&self, stage: GovernorState, total_tasks: usize) {
        self.finish_current();

        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_display_name(stage).to_string());
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.stage_bar.lock() {
            *guard = Some((stage, pb));
        }
    }

    fn on_specialist_complete(&self, specialist: &SpecialistId, success: bool) {
        let Ok(guard) = self.stage_bar.lock() else {
            return;
        };
        if let Some((_, pb)) = guard.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), specialist)
            } else {
                format!("{} {}", "x".red(), specialist)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_verification(&self, result: &VerificationResult) {
        let Ok(guard) = self.stage_bar.lock() else {
            return;
        };
        if let Some((_, pb)) = guard.as_ref() {
            let status = match result.verdict {
                Verdict::Pass => format!("{} {}", "v".green(), result.candidate_id),
                Verdict::Fail => format!("{} {} rejected", "x".red(), result.candidate_id),
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_finished(&self, report: &QueryReport) {
        let current = self.stage_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some((stage, pb)) = current {
            if report.is_success() {
                pb.finish_with_message(format!("{} complete", stage.display_name().green()));
            } else {
                pb.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Plain line-per-event progress on stderr (for non-terminal output)
pub struct SimpleProgress;

impl PipelineObserver for SimpleProgress {
    fn on_stage(&self, stage: GovernorState, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            total_tasks
        );
    }

    fn on_specialist_complete(&self, specialist: &SpecialistId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), specialist);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), specialist);
        }
    }

    fn on_verification(&self, result: &VerificationResult) {
        match result.verdict {
            Verdict::Pass => eprintln!("  {} {} verified", "v".green(), result.candidate_id),
            Verdict::Fail => eprintln!(
                "  {} {} rejected: {}",
                "x".red(),
                result.candidate_id,
                result.failure_reason.as_deref().unwrap_or("no reason")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> ProgressReporter {
        ProgressReporter::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn test_specialist_completions_advance_dispatch_bar() {
        let reporter = hidden();
        reporter.on_stage(GovernorState::Dispatching, 3);
        reporter.on_specialist_complete(&SpecialistId::new("a"), true);
        reporter.on_specialist_complete(&SpecialistId::new("b"), false);

        assert_eq!(reporter.position(), Some((GovernorState::Dispatching, 2)));
    }

    #[test]
    fn test_new_stage_replaces_bar() {
        let reporter = hidden();
        reporter.on_stage(GovernorState::Dispatching, 2);
        reporter.on_specialist_complete(&SpecialistId::new("a"), true);
        reporter.on_stage(GovernorState::Verifying, 2);

        assert_eq!(reporter.position(), Some((GovernorState::Verifying, 0)));

        reporter.on_verification(&VerificationResult {
            candidate_id: SpecialistId::new("a"),
            verdict: Verdict::Fail,
            failure_reason: Some("empty answer".into()),
            failed_check: Some("non_empty".into()),
            confidence: 0.0,
        });
        assert_eq!(reporter.position(), Some((GovernorState::Verifying, 1)));
    }

    #[test]
    fn test_events_without_stage_are_ignored() {
        let reporter = hidden();
        reporter.on_specialist_complete(&SpecialistId::new("a"), true);
        assert_eq!(reporter.position(), None);
    }
}
