//! Immutable log of committed phase changes.
//!
//! The controller records every commit here, and the test harness asserts
//! over the visited path. `record` returns a new history rather than
//! mutating, keeping the log a plain value.

use super::phase::Phase;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why a change was committed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ChangeCause {
    /// Operator reset forced `Init`.
    Reset,
    /// The demand-gated normal cycle advanced.
    Cycle,
    /// Emergency arbitration advanced.
    Emergency,
}

/// Record of a single committed phase change.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PhaseChange {
    /// The phase being left.
    pub from: Phase,
    /// The phase being entered.
    pub to: Phase,
    /// Controller timeline position at the commit.
    pub at: Duration,
    /// How long `from` had been held when it was left.
    pub held: Duration,
    /// Which priority branch produced the change.
    pub cause: ChangeCause,
}

/// Ordered history of phase changes.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{ChangeCause, Phase, PhaseChange, PhaseHistory};
/// use std::time::Duration;
///
/// let history = PhaseHistory::new().record(PhaseChange {
///     from: Phase::Init,
///     to: Phase::NsGreen,
///     at: Duration::from_millis(100),
///     held: Duration::from_millis(100),
///     cause: ChangeCause::Cycle,
/// });
///
/// assert_eq!(history.path(), vec![Phase::Init, Phase::NsGreen]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PhaseHistory {
    changes: Vec<PhaseChange>,
}

impl PhaseHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    pub fn record(&self, change: PhaseChange) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// The path of phases traversed: the first change's origin, then the
    /// target of every change in order.
    pub fn path(&self) -> Vec<Phase> {
        let mut path = Vec::new();
        if let Some(first) = self.changes.first() {
            path.push(first.from);
        }
        for change in &self.changes {
            path.push(change.to);
        }
        path
    }

    /// All recorded changes, in order.
    pub fn changes(&self) -> &[PhaseChange] {
        &self.changes
    }

    /// Timeline span from the first to the last recorded change.
    ///
    /// Returns `None` while the history is empty.
    pub fn span(&self) -> Option<Duration> {
        match (self.changes.first(), self.changes.last()) {
            (Some(first), Some(last)) => Some(last.at.saturating_sub(first.at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: Phase, to: Phase, at_ms: u64) -> PhaseChange {
        PhaseChange {
            from,
            to,
            at: Duration::from_millis(at_ms),
            held: Duration::from_millis(at_ms),
            cause: ChangeCause::Cycle,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = PhaseHistory::new();
        assert!(history.changes().is_empty());
        assert!(history.path().is_empty());
        assert!(history.span().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = PhaseHistory::new();
        let recorded = history.record(change(Phase::Init, Phase::NsGreen, 100));

        assert_eq!(history.changes().len(), 0);
        assert_eq!(recorded.changes().len(), 1);
    }

    #[test]
    fn path_returns_phase_sequence() {
        let history = PhaseHistory::new()
            .record(change(Phase::Init, Phase::NsGreen, 100))
            .record(change(Phase::NsGreen, Phase::NsYellow, 10_100));

        assert_eq!(
            history.path(),
            vec![Phase::Init, Phase::NsGreen, Phase::NsYellow]
        );
    }

    #[test]
    fn span_covers_first_to_last_change() {
        let history = PhaseHistory::new()
            .record(change(Phase::Init, Phase::NsGreen, 100))
            .record(change(Phase::NsGreen, Phase::NsYellow, 10_100));

        assert_eq!(history.span(), Some(Duration::from_millis(10_000)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = PhaseHistory::new().record(change(Phase::Init, Phase::NsGreen, 100));
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: PhaseHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history.changes(), deserialized.changes());
    }
}
