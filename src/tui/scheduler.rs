//! Wall-clock scheduler backed by tokio tasks.

use crate::games::pairs::{FiredTimer, Scheduler, TaskHandle, TimerEvent};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Spawns one tokio task per timer and delivers firings over a channel.
///
/// The event loop drains the receiving end and hands each [`FiredTimer`]
/// to the controller. Cancelling aborts the task, so a cancelled timer
/// never reaches the channel after `cancel` returns unless it was already
/// queued; stale queued events are dropped by their generation.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<FiredTimer>,
    next_id: u64,
    tasks: HashMap<TaskHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its timers fire into.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FiredTimer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Tasks spawned and not yet finished or cancelled.
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        let handle = TaskHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self))]
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TaskHandle {
        let handle = self.allocate();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(FiredTimer { handle, event }).is_err() {
                trace!("Timer receiver dropped");
            }
        });
        self.tasks.insert(handle, task);
        debug!(handle = handle.id(), "Scheduled one-shot timer");
        handle
    }

    #[instrument(skip(self))]
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TaskHandle {
        let handle = self.allocate();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(FiredTimer { handle, event }).is_err() {
                    trace!("Timer receiver dropped");
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        debug!(handle = handle.id(), "Scheduled repeating timer");
        handle
    }

    #[instrument(skip(self), fields(handle = handle.id()))]
    fn cancel(&mut self, handle: TaskHandle) {
        match self.tasks.remove(&handle) {
            Some(task) => {
                task.abort();
                debug!("Timer cancelled");
            }
            None => trace!("Cancelling unknown or finished timer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pairs::CardPosition;

    fn unreveal(generation: u64) -> TimerEvent {
        TimerEvent::Unreveal {
            generation,
            positions: [CardPosition::new(0), CardPosition::new(1)],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let handle = scheduler.schedule_once(Duration::from_millis(800), unreveal(0));

        tokio::time::sleep(Duration::from_millis(799)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.handle, handle);
        assert_eq!(fired.event, unreveal(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let handle = scheduler.schedule_once(Duration::from_millis(800), unreveal(0));
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_until_cancelled() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let handle = scheduler
            .schedule_repeating(Duration::from_millis(10), TimerEvent::ClockTick { generation: 3 });

        for _ in 0..3 {
            let fired = rx.recv().await.unwrap();
            assert_eq!(fired.handle, handle);
        }

        scheduler.cancel(handle);
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }
}
