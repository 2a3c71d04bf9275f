//! Governor state machine
//!
//! ```text
//! Dispatching  → Ranking | Failed
//! Ranking      → Verifying | Failed
//! Verifying    → Verifying (fallback to next candidate) | Synthesizing | Failed
//! Synthesizing → Done | Failed
//! ```
//!
//! `Done` and `Failed` are terminal. Every transition is recorded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// States of one query's pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernorState {
    Dispatching,
    Ranking,
    Verifying,
    Synthesizing,
    Done,
    Failed,
}

impl GovernorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dispatching => "dispatching",
            Self::Ranking => "ranking",
            Self::Verifying => "verifying",
            Self::Synthesizing => "synthesizing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dispatching => "Dispatch",
            Self::Ranking => "Ranking",
            Self::Verifying => "Verification",
            Self::Synthesizing => "Synthesis",
            Self::Done => "Done",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for GovernorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_legal_transition(from: GovernorState, to: GovernorState) -> bool {
    use GovernorState::*;

    if to == Failed && !from.is_terminal() {
        return true;
    }

    matches!(
        (from, to),
        (Dispatching, Ranking)
            | (Ranking, Verifying)
            | (Verifying, Verifying)
            | (Verifying, Synthesizing)
            | (Synthesizing, Done)
    )
}

/// A single recorded transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: GovernorState,
    pub to: GovernorState,
    /// Milliseconds since the run started
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal governor transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: GovernorState,
    pub to: GovernorState,
}

/// Tracks the current state and the transition log of one run
#[derive(Debug, Clone)]
pub struct GovernorStateMachine {
    current: GovernorState,
    started_at: Instant,
    transitions: Vec<TransitionRecord>,
}

impl Default for GovernorStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernorStateMachine {
    /// A run starts in `Dispatching` when the query is received
    pub fn new() -> Self {
        Self {
            current: GovernorState::Dispatching,
            started_at: Instant::now(),
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> GovernorState {
        self.current
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    pub fn advance(
        &mut self,
        to: GovernorState,
        reason: Option<String>,
    ) -> Result<(), IllegalTransition> {
        let from = self.current;
        if !is_legal_transition(from, to) {
            return Err(IllegalTransition { from, to });
        }
        self.transitions.push(TransitionRecord {
            from,
            to,
            elapsed_ms: self.started_at.elapsed().as_millis() as u64,
            reason,
        });
        self.current = to;
        Ok(())
    }

    /// Move to `Failed` from any non-terminal state. No-op once terminal.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if !self.current.is_terminal() {
            let _ = self.advance(GovernorState::Failed, Some(reason.into()));
        }
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn into_transitions(self) -> Vec<TransitionRecord> {
        self.transitions
    }

    /// Number of times `Verifying` was entered
    pub fn verification_entries(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.to == GovernorState::Verifying)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GovernorState::*;

    #[test]
    fn test_happy_path() {
        let mut sm = GovernorStateMachine::new();
        assert_eq!(sm.current(), Dispatching);
        for to in [Ranking, Verifying, Synthesizing, Done] {
            sm.advance(to, None).unwrap();
        }
        assert!(sm.is_terminal());
        assert_eq!(sm.transitions().len(), 4);
        assert_eq!(sm.verification_entries(), 1);
    }

    #[test]
    fn test_fallback_loop() {
        let mut sm = GovernorStateMachine::new();
        sm.advance(Ranking, None).unwrap();
        sm.advance(Verifying, None).unwrap();
        sm.advance(Verifying, Some("candidate a rejected".into())).unwrap();
        sm.advance(Verifying, Some("candidate b rejected".into())).unwrap();
        assert_eq!(sm.verification_entries(), 3);
    }

    #[test]
    fn test_illegal_transitions() {
        let mut sm = GovernorStateMachine::new();
        assert_eq!(
            sm.advance(Verifying, None),
            Err(IllegalTransition {
                from: Dispatching,
                to: Verifying
            })
        );
        assert!(sm.advance(Done, None).is_err());
        // No backward edge from ranking to dispatch
        sm.advance(Ranking, None).unwrap();
        assert!(sm.advance(Dispatching, None).is_err());
    }

    #[test]
    fn test_terminal_is_final() {
        let mut sm = GovernorStateMachine::new();
        sm.fail("deadline");
        assert_eq!(sm.current(), Failed);
        assert!(sm.advance(Ranking, None).is_err());
        assert!(sm.advance(Failed, None).is_err());
        sm.fail("again");
        assert_eq!(sm.transitions().len(), 1);
        assert_eq!(sm.transitions()[0].reason.as_deref(), Some("deadline"));
    }

    #[test]
    fn test_any_live_state_can_fail() {
        for path in [
            vec![],
            vec![Ranking],
            vec![Ranking, Verifying],
            vec![Ranking, Verifying, Synthesizing],
        ] {
            let mut sm = GovernorStateMachine::new();
            for to in path {
                sm.advance(to, None).unwrap();
            }
            assert!(sm.advance(Failed, None).is_ok());
        }
    }
}
