//! JSONL file writer for per-query decision records.
//!
//! Each [`QueryReport`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use ensemble_application::DecisionLogger;
use ensemble_domain::QueryReport;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const RECORD_TYPE: &str = "query_decision";

/// JSONL decision logger that writes one JSON object per query.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file so
/// the log survives restarts. Flushes on `Drop`.
pub struct JsonlDecisionLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDecisionLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create decision log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open decision log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DecisionLogger for JsonlDecisionLogger {
    fn record(&self, report: &QueryReport) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match serde_json::to_value(report) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => return,
            Err(e) => {
                warn!("Could not serialize decision record: {}", e);
                return;
            }
        };
        record.insert("type".to_string(), RECORD_TYPE.into());
        record.insert("timestamp".to_string(), timestamp.into());

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write decision log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlDecisionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::{
        CorrelationId, ErrorCode, ErrorPayload, EvidenceEntry, FailureKind, GovernorState,
        QueryOutcome, SpecialistId, SynthesizedResponse, VerificationHistory, VerificationResult,
    };
    use std::collections::BTreeMap;
    use std::io::Read;

    fn answered(id: &str) -> QueryReport {
        let mut verification = VerificationHistory::new();
        verification.record(VerificationResult::pass(SpecialistId::from("alpha")));
        let mut failures = BTreeMap::new();
        failures.insert(SpecialistId::from("beta"), FailureKind::Timeout);
        QueryReport {
            correlation_id: CorrelationId::new(id),
            query: "what is 2+2?".into(),
            outcome: QueryOutcome::Answered(SynthesizedResponse {
                answer: "4".into(),
                built_from: vec![SpecialistId::from("alpha")],
                evidence: vec![EvidenceEntry {
                    specialist_id: SpecialistId::from("alpha"),
                    score: 0.9,
                    rank: 1,
                    included: true,
                    verdict: None,
                }],
            }),
            final_state: GovernorState::Done,
            attempts: 1,
            verification,
            failures,
            transitions: vec![],
            elapsed_ms: 12,
        }
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("decisions.jsonl");
        let logger = JsonlDecisionLogger::new(&path).unwrap();

        logger.record(&answered("c-1"));
        let mut failed = answered("c-2");
        failed.outcome = QueryOutcome::Failed(ErrorPayload {
            code: ErrorCode::NoCandidates,
            reason: "all failed".into(),
            stage_reached: Some(GovernorState::Dispatching),
        });
        failed.final_state = GovernorState::Failed;
        logger.record(&failed);
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["type"], "query_decision");
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["correlation_id"], "c-1");
        assert_eq!(lines[0]["outcome"]["status"], "answered");
        assert_eq!(lines[0]["failures"]["beta"]["kind"], "timeout");
        assert_eq!(lines[0]["verification"][0]["verdict"], "pass");
        assert_eq!(lines[1]["outcome"]["code"], "no_candidates");
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.jsonl");

        let first = JsonlDecisionLogger::new(&path).unwrap();
        first.record(&answered("c-1"));
        drop(first);
        let second = JsonlDecisionLogger::new(&path).unwrap();
        second.record(&answered("c-2"));
        assert_eq!(second.path(), path.as_path());
        drop(second);

        let ids: Vec<String> = read_lines(&path)
            .iter()
            .map(|l| l["correlation_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["c-1", "c-2"]);
    }

    #[test]
    fn test_unwritable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlDecisionLogger::new(blocker.join("decisions.jsonl")).is_none());
    }
}
