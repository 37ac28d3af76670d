//! Deterministic stand-in for browser timers.
//!
//! Tasks are due at `now + delay`. `advance` moves the clock and hands back
//! everything that came due, ordered by due time and then by scheduling order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due_ms: u64,
    task: T,
}

#[derive(Debug)]
pub struct VirtualScheduler<T> {
    now_ms: u64,
    next_handle: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for VirtualScheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_handle: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> VirtualScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(&mut self, delay_ms: u32, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + u64::from(delay_ms),
            task,
        });
        handle
    }

    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due_ms, p.handle));
        due.into_iter().map(|p| p.task).collect()
    }
}

impl<T: PartialEq> VirtualScheduler<T> {
    /// Schedules `task`, dropping any pending copy first.
    pub fn replace(&mut self, delay_ms: u32, task: T) -> TaskHandle {
        self.pending.retain(|p| p.task != task);
        self.schedule(delay_ms, task)
    }
}
