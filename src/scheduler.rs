/// Handle returned by [`Scheduler::schedule`], usable to cancel the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due_ms: u64,
    epoch: u64,
    task: T,
}

/// A task whose deadline has passed, tagged with the epoch it was scheduled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub epoch: u64,
    pub task: T,
}

/// One-shot, cancelable delayed tasks on a caller-supplied millisecond clock.
///
/// Every task belongs to the epoch that was current when it was scheduled.
/// [`Scheduler::invalidate`] drops everything pending and moves to a new
/// epoch, so nothing scheduled for a replaced round can fire afterwards.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    epoch: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            epoch: 0,
            pending: Vec::new(),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn schedule(&mut self, due_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due_ms,
            epoch: self.epoch,
            task,
        });
        id
    }

    /// Returns false if the task already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Cancels all pending tasks and starts a new epoch
    pub fn invalidate(&mut self) {
        self.pending.clear();
        self.epoch += 1;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }

    /// Removes and returns the earliest task due at `now_ms`.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<T>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.id.0))
            .map(|(idx, _)| idx)?;

        let scheduled = self.pending.remove(idx);
        Some(Fired {
            epoch: scheduled.epoch,
            task: scheduled.task,
        })
    }
}
