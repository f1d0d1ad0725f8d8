//! Owned, cancellable timers.
//!
//! A [`TimerHandle`] is the only way to keep a scheduled callback alive:
//! cancelling it, or simply dropping it, guarantees the callback never runs
//! again. [`Scheduler`] abstracts the host event loop so the same controller
//! code runs against the browser and against [`VirtualScheduler`], a manual
//! clock used on the host.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::error::SiteResult;

pub type RepeatingTask = Box<dyn FnMut()>;
pub type OnceTask = Box<dyn FnOnce()>;

/// Cancels its timer on drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
    // Keeps host-side callback storage (e.g. a JS closure) alive for as long
    // as the handle exists, even after cancellation.
    _keep_alive: Option<Box<dyn Any>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
            _keep_alive: None,
        }
    }

    pub fn with_keep_alive(cancel: impl FnOnce() + 'static, keep: impl Any) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
            _keep_alive: Some(Box::new(keep)),
        }
    }

    /// Stops the timer. Idempotent; safe to call from inside the timer's own
    /// callback.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

pub trait Scheduler {
    /// Runs `task` every `period_ms` until the returned handle is cancelled.
    fn every(&self, period_ms: u32, task: RepeatingTask) -> SiteResult<TimerHandle>;

    /// Runs `task` once after `delay_ms` unless the handle is cancelled first.
    fn after(&self, delay_ms: u32, task: OnceTask) -> SiteResult<TimerHandle>;
}

enum Task {
    Repeating(RepeatingTask),
    Once(OnceTask),
}

struct Entry {
    due: u64,
    period: u64,
    // `None` while the task is running.
    task: Option<Task>,
}

#[derive(Default)]
struct Queue {
    now: u64,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

impl Queue {
    fn insert(&mut self, delay: u64, period: u64, task: Task) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                due: self.now + delay,
                period,
                task: Some(task),
            },
        );
        id
    }

    /// Earliest runnable entry due at or before `limit`; ties go to the
    /// entry scheduled first.
    fn next_due(&self, limit: u64) -> Option<(u64, u64)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.task.is_some() && e.due <= limit)
            .map(|(id, e)| (e.due, *id))
            .min()
    }
}

/// Deterministic scheduler driven by [`VirtualScheduler::advance`].
///
/// Cloning yields another handle onto the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    /// Number of timers that are still scheduled.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Moves the clock forward by `ms`, running every callback that falls due
    /// in timestamp order. Callbacks may schedule or cancel timers.
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = self.queue.borrow().next_due(target);
            let Some((due, id)) = next else {
                break;
            };

            let task = {
                let mut q = self.queue.borrow_mut();
                q.now = due;
                let Some(entry) = q.entries.get_mut(&id) else {
                    continue;
                };
                match entry.task.take() {
                    Some(Task::Once(f)) => {
                        q.entries.remove(&id);
                        Task::Once(f)
                    }
                    Some(task) => task,
                    None => continue,
                }
            };

            match task {
                Task::Once(f) => f(),
                Task::Repeating(mut f) => {
                    f();
                    let mut q = self.queue.borrow_mut();
                    // Gone if cancelled while running.
                    if let Some(entry) = q.entries.get_mut(&id) {
                        entry.due += entry.period;
                        entry.task = Some(Task::Repeating(f));
                    }
                }
            }
        }
        self.queue.borrow_mut().now = target;
    }

    fn handle_for(&self, id: u64) -> TimerHandle {
        let queue: Weak<RefCell<Queue>> = Rc::downgrade(&self.queue);
        TimerHandle::new(move || {
            if let Some(queue) = queue.upgrade() {
                queue.borrow_mut().entries.remove(&id);
            }
        })
    }
}

impl Scheduler for VirtualScheduler {
    fn every(&self, period_ms: u32, task: RepeatingTask) -> SiteResult<TimerHandle> {
        // Browsers clamp a zero interval upward too; never spin on one instant.
        let period = u64::from(period_ms.max(1));
        let id = self
            .queue
            .borrow_mut()
            .insert(period, period, Task::Repeating(task));
        Ok(self.handle_for(id))
    }

    fn after(&self, delay_ms: u32, task: OnceTask) -> SiteResult<TimerHandle> {
        let id = self
            .queue
            .borrow_mut()
            .insert(u64::from(delay_ms), 0, Task::Once(task));
        Ok(self.handle_for(id))
    }
}
