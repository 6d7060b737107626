//! # Pomotick Core Library
//!
//! Core logic for the Pomotick Pomodoro timer: an event-emitting timer state
//! machine, the guarded commands that drive it, and the tick driver that
//! advances it once per second. Shells stay thin; they subscribe to events,
//! render, and feed user intent through the command layer.
//!
//! ## Architecture
//!
//! - **Timer state machine**: eight phases (work/break intervals, their
//!   complete and overtime tails, pause, stop) advanced by handle-guarded
//!   ticks; a countdown reaching zero walks the completion chain on its own
//! - **Commands**: the seven user operations, each a pure guard plus a
//!   single transition, resolvable from symbolic names
//! - **Events**: every observable change is announced synchronously to bus
//!   subscribers, in emission order
//! - **Ticker**: a tokio task turning live schedules into one tick per second
//!
//! ## Key Components
//!
//! - [`TimerStateMachine`]: the state machine
//! - [`TimerCommand`]: guarded user commands and the name factory
//! - [`TimerEvent`]: bus event payloads
//! - [`timer::ticker`]: the schedule driver

pub mod commands;
pub mod error;
pub mod events;
pub mod timer;

pub use commands::TimerCommand;
pub use error::{CoreError, Result};
pub use events::{EventBus, ListenerId, TimerEvent};
pub use timer::{PauseType, ScheduleId, TimerSnapshot, TimerState, TimerStateMachine};
