//! Deferred and repeating timers as cancellable tasks.
//!
//! The session never captures itself in a callback. It asks a [`Scheduler`]
//! to deliver a [`TimerEvent`] later and keeps the returned [`TaskHandle`]
//! so the task can be cancelled on restart or completion. Events also carry
//! the session generation they were scheduled under.

use super::types::CardPosition;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wraps a scheduler-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Work the session asked to be told about later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Flip a mismatched pair back face down.
    Unreveal {
        /// Session generation at scheduling time.
        generation: u64,
        /// The two cards captured at scheduling time.
        positions: [CardPosition; 2],
    },
    /// Advance the elapsed clock by one interval.
    ClockTick {
        /// Session generation at scheduling time.
        generation: u64,
    },
}

impl TimerEvent {
    /// Generation the event belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::Unreveal { generation, .. } | TimerEvent::ClockTick { generation } => {
                *generation
            }
        }
    }
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredTimer {
    /// Task that fired.
    pub handle: TaskHandle,
    /// Payload given at scheduling time.
    pub event: TimerEvent,
}

/// Schedules timer events for later delivery.
pub trait Scheduler {
    /// Delivers `event` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TaskHandle;

    /// Delivers `event` every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle;

    /// Cancels a task. Cancelling an unknown or finished task is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone)]
struct PendingTask {
    handle: TaskHandle,
    due: Duration,
    period: Option<Duration>,
    event: TimerEvent,
}

/// Virtual-time scheduler advanced explicitly by its owner.
///
/// Due tasks are released one at a time through [`ManualScheduler::pop_due`]
/// so that a cancellation made while handling one event takes effect before
/// the next one is released.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<PendingTask>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the task is still scheduled.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Releases the earliest task due at or before `deadline`.
    ///
    /// Virtual time moves to the task's due time. Repeating tasks are
    /// re-armed one period later; one-shot tasks are removed.
    #[instrument(skip(self))]
    pub fn pop_due(&mut self, deadline: Duration) -> Option<FiredTimer> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[index];
        self.now = self.now.max(task.due);
        let fired = FiredTimer {
            handle: task.handle,
            event: task.event,
        };

        match task.period {
            Some(period) => task.due += period,
            None => {
                self.tasks.remove(index);
            }
        }

        trace!(handle = fired.handle.id(), now = ?self.now, "Timer fired");
        Some(fired)
    }

    /// Moves virtual time forward without releasing anything.
    ///
    /// Used after draining [`ManualScheduler::pop_due`] up to `deadline`.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn allocate(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle::new(self.next_id)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TaskHandle {
        let handle = self.allocate();
        debug!(handle = handle.id(), ?delay, "Scheduled one-shot timer");
        self.tasks.push(PendingTask {
            handle,
            due: self.now + delay,
            period: None,
            event,
        });
        handle
    }

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle {
        let handle = self.allocate();
        debug!(handle = handle.id(), ?period, "Scheduled repeating timer");
        self.tasks.push(PendingTask {
            handle,
            due: self.now + period,
            period: Some(period),
            event,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        if self.tasks.len() != before {
            debug!(handle = handle.id(), "Cancelled timer");
        }
    }
}
