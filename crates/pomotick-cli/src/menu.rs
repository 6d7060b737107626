//! Per-state command menu.
//!
//! Which commands the interactive prompt advertises in each state. Visibility
//! is narrower than the command guards: force commands stay hidden while
//! paused, and `stop` is always listed even where it is disabled.

use pomotick_core::{TimerCommand, TimerState, TimerStateMachine};

/// Commands presented in the given state, in menu order.
pub fn visible_commands(state: TimerState) -> &'static [TimerCommand] {
    match state {
        TimerState::Stop => &[TimerCommand::StartWork, TimerCommand::Stop],
        TimerState::Work => &[
            TimerCommand::Pause,
            TimerCommand::Stop,
            TimerCommand::ForceBreak,
        ],
        TimerState::Pause => &[TimerCommand::Resume, TimerCommand::Stop],
        TimerState::Break => &[
            TimerCommand::Pause,
            TimerCommand::Stop,
            TimerCommand::ForceWork,
        ],
        TimerState::WorkComplete | TimerState::WorkOvertime => &[
            TimerCommand::StartBreak,
            TimerCommand::Stop,
            TimerCommand::ForceWork,
        ],
        TimerState::BreakComplete | TimerState::BreakOvertime => &[
            TimerCommand::StartWork,
            TimerCommand::Stop,
            TimerCommand::ForceBreak,
        ],
    }
}

/// Visible commands that would currently execute.
pub fn available_commands(machine: &TimerStateMachine) -> Vec<TimerCommand> {
    visible_commands(machine.state())
        .iter()
        .copied()
        .filter(|command| command.can_execute(machine))
        .collect()
}

/// Comma-separated names of the currently available commands.
pub fn prompt_line(machine: &TimerStateMachine) -> String {
    available_commands(machine)
        .iter()
        .map(|command| command.name())
        .collect::<Vec<_>>()
        .join(", ")
}
