use repairkit_domain::ports::{Clock, ScheduledTask, Scheduler};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Drops every task. Cooldowns still expire through the lazy check on read.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn run_after(&self, _delay: Duration, _task: ScheduledTask) {}
}

struct Pending {
    due_ms: i64,
    seq: u64,
    task: ScheduledTask,
}

#[derive(Default)]
struct Queue {
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Queues tasks until the host's tick thread calls [`run_due`](Self::run_due).
///
/// Tasks therefore run on the same thread as every other engine call.
pub struct DeferredScheduler {
    clock: Arc<dyn Clock>,
    queue: Mutex<Queue>,
}

impl DeferredScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: Mutex::new(Queue::default()),
        }
    }

    /// Run every task due at or before `now_ms`, earliest first. Returns how many ran.
    pub fn run_due(&self, now_ms: i64) -> usize {
        let mut due = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut queue.pending)
                .into_iter()
                .partition(|p| p.due_ms <= now_ms);
            queue.pending = waiting;
            due
        };
        due.sort_by_key(|p| (p.due_ms, p.seq));

        let count = due.len();
        for pending in due {
            (pending.task)();
        }
        if count > 0 {
            debug!(count, now_ms, "ran scheduled tasks");
        }
        count
    }

    /// Run everything due according to the scheduler's own clock.
    pub fn tick(&self) -> usize {
        self.run_due(self.clock.now_ms())
    }

    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }
}

impl Scheduler for DeferredScheduler {
    fn run_after(&self, delay: Duration, task: ScheduledTask) {
        let millis = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        let due_ms = self.clock.now_ms().saturating_add(millis);

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(Pending { due_ms, seq, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn tasks_run_only_once_due_and_in_order() {
        let clock = Arc::new(ManualClock::new(0));
        let scheduler = DeferredScheduler::new(clock.clone());
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 200), ("early", 100), ("early-2", 100)] {
            let order = Arc::clone(&order);
            scheduler.run_after(
                Duration::from_millis(delay),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        assert_eq!(scheduler.run_due(99), 0);
        assert_eq!(scheduler.pending(), 3);

        clock.set(150);
        assert_eq!(scheduler.tick(), 2);
        assert_eq!(scheduler.run_due(1_000), 1);
        assert_eq!(*order.lock().unwrap(), vec!["early", "early-2", "late"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn noop_scheduler_never_runs_tasks() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        NoopScheduler.run_after(
            Duration::ZERO,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
