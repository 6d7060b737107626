//! Timer state machine.
//!
//! Owns the current/previous state, the remaining (or accrued) seconds, the
//! pause bookkeeping and the active tick schedule. It never sleeps or spawns;
//! time advances only through [`TimerStateMachine::tick`], which the ticker
//! driver calls once per interval with the handle of the schedule it serves.
//!
//! ## State Transitions
//!
//! ```text
//! work  -> work_complete  -> work_overtime    (countdown reaching zero)
//! break -> break_complete -> break_overtime
//! work/break <-> pause                        (pause / resume commands)
//! any -> stop, forced jumps into work/break   (stop / force commands)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut machine = TimerStateMachine::new();
//! machine.transition_to(TimerState::Work);
//! // In the tick driver:
//! if let Some(id) = machine.active_schedule() {
//!     machine.tick(id);
//! }
//! ```

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::state::{
    PauseType, TimerState, BREAK_DURATION_SECS, COMPLETE_DURATION_SECS, WORK_DURATION_SECS,
};
use crate::events::{EventBus, ListenerId, TimerEvent};

/// Opaque handle to one started tick schedule.
///
/// A fresh handle is issued every time a schedule starts. A tick presented
/// with a superseded handle is discarded, which is what makes cancellation
/// synchronous even when a tick was already queued elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy)]
struct TickSchedule {
    id: ScheduleId,
    direction: Direction,
}

/// Serializable view of the machine for status output.
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub seconds: u64,
    pub pause_type: Option<PauseType>,
}

/// The timer core: eight states, one live tick schedule at most.
pub struct TimerStateMachine {
    current: TimerState,
    previous: Option<TimerState>,
    /// Remaining seconds in countdown states, accrued seconds in overtime.
    current_time: u64,
    pause_type: Option<PauseType>,
    /// Snapshot of `current_time` taken on entering pause.
    pause_time: u64,
    schedule: Option<TickSchedule>,
    /// Issues schedule handles; never reused within one machine.
    schedule_seq: u64,
    schedule_tx: watch::Sender<Option<ScheduleId>>,
    bus: EventBus,
}

impl TimerStateMachine {
    /// Fresh machine: stopped, zero seconds, no schedule.
    pub fn new() -> Self {
        let (schedule_tx, _) = watch::channel(None);
        Self {
            current: TimerState::Stop,
            previous: None,
            current_time: 0,
            pause_type: None,
            pause_time: 0,
            schedule: None,
            schedule_seq: 0,
            schedule_tx,
            bus: EventBus::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.current
    }

    pub fn previous_state(&self) -> Option<TimerState> {
        self.previous
    }

    /// Seconds remaining (countdown states) or accrued (overtime states).
    pub fn time(&self) -> u64 {
        self.current_time
    }

    pub fn pause_kind(&self) -> Option<PauseType> {
        self.pause_type
    }

    /// Handle of the live schedule, if one is running.
    pub fn active_schedule(&self) -> Option<ScheduleId> {
        self.schedule.map(|schedule| schedule.id)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.current,
            seconds: self.current_time,
            pause_type: self.pause_type,
        }
    }

    /// Watch the live schedule handle. The ticker driver re-arms its
    /// interval whenever the value changes and stops once the machine is
    /// dropped.
    pub fn schedule_changes(&self) -> watch::Receiver<Option<ScheduleId>> {
        self.schedule_tx.subscribe()
    }

    // ── Events ───────────────────────────────────────────────────────

    pub fn on_event<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TimerEvent) + Send + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.bus.unsubscribe(id);
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Switch to `new_state`, reconfiguring time and schedule for it.
    ///
    /// The machine rejects only self-transitions; which transitions user
    /// intent may actually reach is the command layer's business. Returns
    /// whether the transition was taken.
    pub fn transition_to(&mut self, new_state: TimerState) -> bool {
        if new_state == self.current {
            debug!(state = %self.current, "ignoring transition to current state");
            return false;
        }
        self.cancel_schedule();
        let old_state = self.current;
        self.previous = Some(old_state);
        self.current = new_state;
        self.enter(new_state, old_state);
        debug!(from = %old_state, to = %new_state, seconds = self.current_time, "state changed");
        self.bus.emit(&TimerEvent::StateChanged {
            from: old_state,
            to: new_state,
            at: Utc::now(),
        });
        true
    }

    /// Advance the schedule identified by `id` by one interval.
    ///
    /// Returns false without any effect when `id` no longer names the live
    /// schedule, so a tick queued for a canceled schedule can never advance
    /// its successor.
    pub fn tick(&mut self, id: ScheduleId) -> bool {
        let Some(schedule) = self.schedule else {
            return false;
        };
        if schedule.id != id {
            return false;
        }
        match schedule.direction {
            Direction::Up => {
                self.current_time += 1;
                self.bus.emit(&TimerEvent::TimeUpdated {
                    seconds: self.current_time,
                    at: Utc::now(),
                });
            }
            Direction::Down => {
                self.current_time = self.current_time.saturating_sub(1);
                if self.current_time == 0 {
                    self.cancel_schedule();
                    self.complete();
                } else {
                    self.bus.emit(&TimerEvent::TimeUpdated {
                        seconds: self.current_time,
                        at: Utc::now(),
                    });
                }
            }
        }
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Per-state entry setup: duration, count direction, whether a schedule
    /// runs at all. Work and break resume the frozen time when entered from
    /// pause and start fresh otherwise.
    fn enter(&mut self, state: TimerState, from: TimerState) {
        match state {
            TimerState::Stop => {
                self.current_time = 0;
            }
            TimerState::Work => {
                self.current_time = if from == TimerState::Pause {
                    self.pause_time
                } else {
                    WORK_DURATION_SECS
                };
                self.start_schedule(Direction::Down);
            }
            TimerState::Break => {
                self.current_time = if from == TimerState::Pause {
                    self.pause_time
                } else {
                    BREAK_DURATION_SECS
                };
                self.start_schedule(Direction::Down);
            }
            TimerState::Pause => {
                // Time stays frozen at its pre-pause value.
                match from {
                    TimerState::Work => self.pause_type = Some(PauseType::FromWork),
                    TimerState::Break => self.pause_type = Some(PauseType::FromBreak),
                    other => {
                        warn!(from = %other, "pause entered from a state no command guard allows");
                    }
                }
                self.pause_time = self.current_time;
            }
            TimerState::WorkComplete | TimerState::BreakComplete => {
                self.current_time = COMPLETE_DURATION_SECS;
                self.start_schedule(Direction::Down);
            }
            TimerState::WorkOvertime | TimerState::BreakOvertime => {
                self.current_time = 0;
                self.start_schedule(Direction::Up);
            }
        }
    }

    /// A countdown hit zero: announce the finished phase, then walk the
    /// completion chain. The completed state is reported, not the next one.
    fn complete(&mut self) {
        let completed = self.current;
        self.bus.emit(&TimerEvent::TimerCompleted {
            state: completed,
            at: Utc::now(),
        });
        match completed.completion_target() {
            Some(next) => {
                self.transition_to(next);
            }
            None => {
                warn!(state = %completed, "countdown ran out in a state with no completion target");
            }
        }
    }

    fn start_schedule(&mut self, direction: Direction) {
        self.schedule_seq += 1;
        let id = ScheduleId(self.schedule_seq);
        self.schedule = Some(TickSchedule { id, direction });
        self.schedule_tx.send_replace(Some(id));
    }

    fn cancel_schedule(&mut self) {
        if self.schedule.take().is_some() {
            self.schedule_tx.send_replace(None);
        }
    }
}

impl Default for TimerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerStateMachine {
    fn drop(&mut self) {
        self.cancel_schedule();
    }
}
