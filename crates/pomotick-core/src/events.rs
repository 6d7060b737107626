//! Timer events and the subscription bus.
//!
//! Everything observable about the state machine is announced as a
//! [`TimerEvent`]. Delivery is synchronous: listeners run inside the call
//! that emits, in subscription order, before that call returns. A shell that
//! needs the events elsewhere (another task, a render loop) subscribes a
//! listener that forwards into a channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// A single observable change in the machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    /// An accepted transition, after entry initialization ran.
    StateChanged {
        from: TimerState,
        to: TimerState,
        at: DateTime<Utc>,
    },
    /// One tick advanced the clock. Never emitted for the tick that lands a
    /// countdown on zero; that tick produces `TimerCompleted` instead.
    TimeUpdated { seconds: u64, at: DateTime<Utc> },
    /// A countdown ran out. `state` is the phase that finished, not the one
    /// about to start.
    TimerCompleted {
        state: TimerState,
        at: DateTime<Utc>,
    },
}

/// Identifies one bus subscription so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TimerEvent) + Send>;

/// Ordered synchronous observer dispatch.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TimerEvent) + Send + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn emit(&mut self, event: &TimerEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}
