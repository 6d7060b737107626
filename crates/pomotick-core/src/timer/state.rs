//! Timer states, pause provenance, and the fixed interval durations.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Seconds in a fresh work interval (25 minutes).
pub const WORK_DURATION_SECS: u64 = 25 * 60;
/// Seconds in a fresh break interval (5 minutes).
pub const BREAK_DURATION_SECS: u64 = 5 * 60;
/// Seconds a complete phase lasts before overtime takes over.
pub const COMPLETE_DURATION_SECS: u64 = 60;
/// Cadence of the tick schedule.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The eight phases a timer can be in. Exactly one is current at any instant.
///
/// Work and break intervals count down; when one runs out the machine walks
/// the completion chain into the matching complete phase and, if the user
/// still does nothing, into open-ended overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Stop,
    Work,
    Pause,
    Break,
    WorkComplete,
    WorkOvertime,
    BreakComplete,
    BreakOvertime,
}

impl TimerState {
    /// Every state, for table-driven callers and tests.
    pub const ALL: [TimerState; 8] = [
        TimerState::Stop,
        TimerState::Work,
        TimerState::Pause,
        TimerState::Break,
        TimerState::WorkComplete,
        TimerState::WorkOvertime,
        TimerState::BreakComplete,
        TimerState::BreakOvertime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimerState::Stop => "stop",
            TimerState::Work => "work",
            TimerState::Pause => "pause",
            TimerState::Break => "break",
            TimerState::WorkComplete => "work_complete",
            TimerState::WorkOvertime => "work_overtime",
            TimerState::BreakComplete => "break_complete",
            TimerState::BreakOvertime => "break_overtime",
        }
    }

    /// Where a finished countdown lands.
    ///
    /// `None` for the states whose schedule never terminates on its own
    /// (overtime counts up) or that run no schedule at all (stop, pause).
    pub fn completion_target(self) -> Option<TimerState> {
        match self {
            TimerState::Work => Some(TimerState::WorkComplete),
            TimerState::Break => Some(TimerState::BreakComplete),
            TimerState::WorkComplete => Some(TimerState::WorkOvertime),
            TimerState::BreakComplete => Some(TimerState::BreakOvertime),
            _ => None,
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which interval a pause interrupted.
///
/// Recorded when `Pause` is entered from work or break and consumed by the
/// next resume so it can return to the right interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseType {
    FromWork,
    FromBreak,
}

impl PauseType {
    /// The state a resume returns to.
    pub fn resume_state(self) -> TimerState {
        match self {
            PauseType::FromWork => TimerState::Work,
            PauseType::FromBreak => TimerState::Break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_chain_ends_in_overtime() {
        assert_eq!(
            TimerState::Work.completion_target(),
            Some(TimerState::WorkComplete)
        );
        assert_eq!(
            TimerState::WorkComplete.completion_target(),
            Some(TimerState::WorkOvertime)
        );
        assert_eq!(TimerState::WorkOvertime.completion_target(), None);

        assert_eq!(
            TimerState::Break.completion_target(),
            Some(TimerState::BreakComplete)
        );
        assert_eq!(
            TimerState::BreakComplete.completion_target(),
            Some(TimerState::BreakOvertime)
        );
        assert_eq!(TimerState::BreakOvertime.completion_target(), None);
    }

    #[test]
    fn idle_states_have_no_completion() {
        assert_eq!(TimerState::Stop.completion_target(), None);
        assert_eq!(TimerState::Pause.completion_target(), None);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&TimerState::WorkComplete).unwrap();
        assert_eq!(json, "\"work_complete\"");
        let back: TimerState = serde_json::from_str("\"break_overtime\"").unwrap();
        assert_eq!(back, TimerState::BreakOvertime);
    }

    #[test]
    fn resume_state_matches_origin() {
        assert_eq!(PauseType::FromWork.resume_state(), TimerState::Work);
        assert_eq!(PauseType::FromBreak.resume_state(), TimerState::Break);
    }

    #[test]
    fn durations() {
        assert_eq!(WORK_DURATION_SECS, 1500);
        assert_eq!(BREAK_DURATION_SECS, 300);
        assert_eq!(COMPLETE_DURATION_SECS, 60);
        assert_eq!(TICK_INTERVAL.as_secs(), 1);
    }
}
