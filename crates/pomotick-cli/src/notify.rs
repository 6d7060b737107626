//! Desktop notification sink.
//!
//! Only the work and break intervals announce their completion; the
//! complete-phase countdowns and overtime run silently.

use notify_rust::Notification;
use pomotick_core::TimerState;
use tracing::warn;

const SUMMARY: &str = "Pomotick";

fn completion_body(state: TimerState) -> Option<&'static str> {
    match state {
        TimerState::Work => Some("🎉 Work session completed! Time for a break!"),
        TimerState::Break => Some("☕ Break is over! Ready to work?"),
        _ => None,
    }
}

/// Announce a completed interval. Failures are logged, never fatal.
pub fn timer_completed(state: TimerState) {
    let Some(body) = completion_body(state) else {
        return;
    };
    if let Err(e) = Notification::new().summary(SUMMARY).body(body).show() {
        warn!(error = %e, "desktop notification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_work_and_break_notify() {
        assert!(completion_body(TimerState::Work).is_some());
        assert!(completion_body(TimerState::Break).is_some());
        assert!(completion_body(TimerState::WorkComplete).is_none());
        assert!(completion_body(TimerState::BreakComplete).is_none());
        assert!(completion_body(TimerState::Stop).is_none());
    }
}
