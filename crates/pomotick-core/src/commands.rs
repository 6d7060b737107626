//! User-facing timer commands.
//!
//! Each command pairs a guard ([`TimerCommand::can_execute`]) with an action
//! ([`TimerCommand::execute`]) over a [`TimerStateMachine`]. Guards are
//! advisory gating for menus and input handling; execution performs exactly
//! one transition and relies on the machine's own validation as the only
//! safety net. Symbolic names resolve through [`TimerCommand::from_name`].

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::CoreError;
use crate::timer::{TimerState, TimerStateMachine};

/// The seven user-invokable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerCommand {
    StartWork,
    StartBreak,
    Pause,
    Resume,
    Stop,
    ForceBreak,
    ForceWork,
}

impl TimerCommand {
    /// Every command, for table-driven callers.
    pub const ALL: [TimerCommand; 7] = [
        TimerCommand::StartWork,
        TimerCommand::StartBreak,
        TimerCommand::Pause,
        TimerCommand::Resume,
        TimerCommand::Stop,
        TimerCommand::ForceBreak,
        TimerCommand::ForceWork,
    ];

    /// Symbolic name, as accepted by [`TimerCommand::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            TimerCommand::StartWork => "start-work",
            TimerCommand::StartBreak => "start-break",
            TimerCommand::Pause => "pause",
            TimerCommand::Resume => "resume",
            TimerCommand::Stop => "stop",
            TimerCommand::ForceBreak => "force-break",
            TimerCommand::ForceWork => "force-work",
        }
    }

    /// Resolve a symbolic name to a command.
    ///
    /// Unknown names indicate a caller defect and come back as
    /// [`CoreError::UnknownCommand`].
    pub fn from_name(name: &str) -> Result<TimerCommand, CoreError> {
        match name {
            "start-work" => Ok(TimerCommand::StartWork),
            "start-break" => Ok(TimerCommand::StartBreak),
            "pause" => Ok(TimerCommand::Pause),
            "resume" => Ok(TimerCommand::Resume),
            "stop" => Ok(TimerCommand::Stop),
            "force-break" => Ok(TimerCommand::ForceBreak),
            "force-work" => Ok(TimerCommand::ForceWork),
            other => Err(CoreError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether this command may run from the machine's current state.
    /// Pure; callers check this before [`TimerCommand::execute`].
    pub fn can_execute(self, machine: &TimerStateMachine) -> bool {
        let state = machine.state();
        match self {
            TimerCommand::StartWork => matches!(
                state,
                TimerState::Stop | TimerState::BreakComplete | TimerState::BreakOvertime
            ),
            TimerCommand::StartBreak => {
                matches!(state, TimerState::WorkComplete | TimerState::WorkOvertime)
            }
            TimerCommand::Pause => matches!(state, TimerState::Work | TimerState::Break),
            TimerCommand::Resume => state == TimerState::Pause,
            TimerCommand::Stop => state != TimerState::Stop,
            TimerCommand::ForceBreak => state != TimerState::Break && state != TimerState::Stop,
            TimerCommand::ForceWork => state != TimerState::Work && state != TimerState::Stop,
        }
    }

    /// Run the command: a single transition on the machine.
    ///
    /// Resume alone branches, returning to whichever interval the pause
    /// interrupted. Returns whether a transition was taken.
    pub fn execute(self, machine: &mut TimerStateMachine) -> bool {
        match self {
            TimerCommand::StartWork | TimerCommand::ForceWork => {
                machine.transition_to(TimerState::Work)
            }
            TimerCommand::StartBreak | TimerCommand::ForceBreak => {
                machine.transition_to(TimerState::Break)
            }
            TimerCommand::Pause => machine.transition_to(TimerState::Pause),
            TimerCommand::Resume => match machine.pause_kind() {
                Some(kind) => machine.transition_to(kind.resume_state()),
                None => {
                    warn!("resume invoked with no recorded pause origin");
                    false
                }
            },
            TimerCommand::Stop => machine.transition_to(TimerState::Stop),
        }
    }
}

impl fmt::Display for TimerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimerCommand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimerCommand::from_name(s)
    }
}
