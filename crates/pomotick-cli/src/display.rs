//! Status line formatting.
//!
//! Pure helpers mapping timer state to terminal text: a clock readout, an
//! interval glyph, and a human caption. Work-side states show an hourglass,
//! break-side states a coffee cup; a paused timer keeps the glyph of the
//! interval it paused.

use pomotick_core::{PauseType, TimerState};

const WORK_GLYPH: &str = "\u{23f3}";
const BREAK_GLYPH: &str = "\u{2615}";

/// Zero-padded `MM:SS`. Minutes run past 99 unclamped.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Clock readout for a state: empty when stopped, `+MM:SS` in overtime,
/// `MM:SS` otherwise.
pub fn format_time(state: TimerState, seconds: u64) -> String {
    match state {
        TimerState::Stop => String::new(),
        TimerState::WorkOvertime | TimerState::BreakOvertime => {
            format!("+{}", format_clock(seconds))
        }
        _ => format_clock(seconds),
    }
}

/// Glyph for the current interval side.
pub fn state_glyph(state: TimerState, pause: Option<PauseType>) -> &'static str {
    match state {
        TimerState::Pause => match pause {
            Some(PauseType::FromBreak) => BREAK_GLYPH,
            _ => WORK_GLYPH,
        },
        TimerState::Break | TimerState::BreakComplete | TimerState::BreakOvertime => BREAK_GLYPH,
        _ => WORK_GLYPH,
    }
}

/// Human caption for a state.
pub fn state_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Stop => "stopped",
        TimerState::Work => "work",
        TimerState::Pause => "paused",
        TimerState::Break => "break",
        TimerState::WorkComplete => "work complete",
        TimerState::WorkOvertime => "work overtime",
        TimerState::BreakComplete => "break complete",
        TimerState::BreakOvertime => "break overtime",
    }
}

/// One-line status: `[glyph] label [time]`.
pub fn status_line(
    state: TimerState,
    pause: Option<PauseType>,
    seconds: u64,
    glyphs: bool,
) -> String {
    let mut line = String::new();
    if glyphs {
        line.push_str(state_glyph(state, pause));
        line.push(' ');
    }
    line.push_str(state_label(state));
    let time = format_time(state, seconds);
    if !time.is_empty() {
        line.push(' ');
        line.push_str(&time);
    }
    line
}
