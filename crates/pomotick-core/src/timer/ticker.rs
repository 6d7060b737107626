//! Tick driver.
//!
//! Bridges the machine's schedule handle to real time: while a schedule is
//! live, fire one guarded tick per second into the machine. The machine side
//! stays free of sleeps and tasks, so tests can drive [`TimerStateMachine::tick`]
//! directly; this driver only supplies the cadence.
//!
//! The driver holds the machine weakly and follows its schedule watch
//! channel, so it winds down on its own once the machine is dropped.

use std::sync::{Arc, Mutex, Weak};

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use super::machine::TimerStateMachine;
use super::state::TICK_INTERVAL;

/// Drive `machine` until it is dropped.
///
/// A fresh interval is armed for every schedule the machine starts, so the
/// first tick of a schedule always lands one full interval after the
/// transition that started it. Every tick carries the handle it was armed
/// for; the machine discards any that arrive after that schedule was
/// canceled.
pub async fn run(machine: Weak<Mutex<TimerStateMachine>>) {
    let mut schedules = {
        let Some(machine) = machine.upgrade() else {
            return;
        };
        let Ok(machine) = machine.lock() else {
            return;
        };
        machine.schedule_changes()
    };

    loop {
        // Wait for a live schedule.
        let id = loop {
            if let Some(id) = *schedules.borrow_and_update() {
                break id;
            }
            if schedules.changed().await.is_err() {
                return; // Machine dropped.
            }
        };

        let mut ticks = time::interval(TICK_INTERVAL);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticks.tick().await; // An interval's first tick is immediate; skip it.

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    let Some(machine) = machine.upgrade() else {
                        return;
                    };
                    let Ok(mut machine) = machine.lock() else {
                        return;
                    };
                    if !machine.tick(id) {
                        break; // Superseded; re-sync to the live schedule.
                    }
                }
                changed = schedules.changed() => {
                    match changed {
                        Ok(()) => break, // Re-arm for the new schedule.
                        Err(_) => return,
                    }
                }
            }
        }
    }
}

/// Spawn [`run`] on the current runtime.
pub fn spawn(machine: &Arc<Mutex<TimerStateMachine>>) -> JoinHandle<()> {
    tokio::spawn(run(Arc::downgrade(machine)))
}
