mod machine;
mod state;
pub mod ticker;

pub use machine::{ScheduleId, TimerSnapshot, TimerStateMachine};
pub use state::{
    PauseType, TimerState, BREAK_DURATION_SECS, COMPLETE_DURATION_SECS, TICK_INTERVAL,
    WORK_DURATION_SECS,
};
