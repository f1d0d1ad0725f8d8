//! Simulated boot sequence.
//!
//! [`BootSequence`] is the pure counter: it starts at 0, adds a random
//! increment per step and pins at exactly 100. [`BootController`] drives it on
//! a [`Scheduler`], holds the terminal value on screen for `hold_ms`, then
//! reports completion once.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::rc::{Rc, Weak};

use crate::config::BootConfig;
use crate::error::SiteResult;
use crate::timer::{Scheduler, TimerHandle};

pub const COMPLETE_PERCENT: u8 = 100;

/// Counter text as shown on the boot screen.
pub fn percent_label(progress: u8) -> String {
    format!("{progress}%")
}

/// Source of per-tick progress increments.
pub trait IncrementSource {
    fn next_increment(&mut self, range: RangeInclusive<u8>) -> u8;
}

impl IncrementSource for fastrand::Rng {
    fn next_increment(&mut self, range: RangeInclusive<u8>) -> u8 {
        self.u8(range)
    }
}

impl<T: IncrementSource + ?Sized> IncrementSource for Box<T> {
    fn next_increment(&mut self, range: RangeInclusive<u8>) -> u8 {
        (**self).next_increment(range)
    }
}

/// Replays a fixed list of increments, then keeps returning the range minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIncrements {
    queue: VecDeque<u8>,
}

impl ScriptedIncrements {
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            queue: values.into_iter().collect(),
        }
    }
}

impl IncrementSource for ScriptedIncrements {
    fn next_increment(&mut self, range: RangeInclusive<u8>) -> u8 {
        self.queue.pop_front().unwrap_or(*range.start())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Running,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStep {
    Advanced(u8),
    /// Progress just reached 100. Returned exactly once.
    Completed,
    /// Already complete; nothing changed.
    Idle,
}

#[derive(Debug)]
pub struct BootSequence<R> {
    source: R,
    range: RangeInclusive<u8>,
    progress: u8,
    phase: BootPhase,
    ticks: u32,
}

impl<R: IncrementSource> BootSequence<R> {
    /// Unvalidated ranges are repaired rather than rejected: the lower bound
    /// is raised to 1 and the upper bound to at least the lower one, so the
    /// sequence always terminates.
    pub fn new(source: R, config: &BootConfig) -> Self {
        let lo = config.min_increment.max(1);
        let hi = config.max_increment.max(lo);
        Self {
            source,
            range: lo..=hi,
            progress: 0,
            phase: BootPhase::Running,
            ticks: 0,
        }
    }

    pub fn step(&mut self) -> BootStep {
        if self.phase == BootPhase::Complete {
            return BootStep::Idle;
        }
        self.ticks += 1;

        let (lo, hi) = (*self.range.start(), *self.range.end());
        let inc = self.source.next_increment(lo..=hi).clamp(lo, hi);
        let next = u16::from(self.progress) + u16::from(inc);
        if next >= u16::from(COMPLETE_PERCENT) {
            self.progress = COMPLETE_PERCENT;
            self.phase = BootPhase::Complete;
            BootStep::Completed
        } else {
            self.progress = next as u8;
            BootStep::Advanced(self.progress)
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn label(&self) -> String {
        percent_label(self.progress)
    }

    /// Progress as 0.0..=1.0, for the scribble stroke length.
    pub fn fraction(&self) -> f64 {
        f64::from(self.progress) / f64::from(COMPLETE_PERCENT)
    }
}

pub type ProgressCallback = Box<dyn FnMut(u8)>;
pub type CompleteCallback = Box<dyn FnOnce()>;

struct BootShared {
    sequence: BootSequence<Box<dyn IncrementSource>>,
    ticker: Option<TimerHandle>,
    hold: Option<TimerHandle>,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<CompleteCallback>,
    finished: bool,
    torn_down: bool,
}

/// Runs a [`BootSequence`] on a scheduler for as long as it is alive.
///
/// Scheduled callbacks only hold weak references to the controller state, and
/// the timers themselves are owned here, so dropping the controller (or
/// calling [`BootController::teardown`]) silences it for good.
pub struct BootController {
    shared: Rc<RefCell<BootShared>>,
}

impl BootController {
    #[tracing::instrument(skip_all, fields(tick_ms = config.tick_ms, hold_ms = config.hold_ms))]
    pub fn activate(
        scheduler: Rc<dyn Scheduler>,
        source: impl IncrementSource + 'static,
        config: &BootConfig,
        on_progress: impl FnMut(u8) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> SiteResult<Self> {
        config.validate()?;
        let source: Box<dyn IncrementSource> = Box::new(source);
        let shared = Rc::new(RefCell::new(BootShared {
            sequence: BootSequence::new(source, config),
            ticker: None,
            hold: None,
            on_progress: Some(Box::new(on_progress)),
            on_complete: Some(Box::new(on_complete)),
            finished: false,
            torn_down: false,
        }));

        let weak = Rc::downgrade(&shared);
        let hold_ms = config.hold_ms;
        let tick_scheduler = scheduler.clone();
        let ticker = scheduler.every(
            config.tick_ms,
            Box::new(move || tick(&weak, tick_scheduler.as_ref(), hold_ms)),
        )?;
        shared.borrow_mut().ticker = Some(ticker);
        tracing::info!("boot sequence started");

        Ok(Self { shared })
    }

    pub fn progress(&self) -> u8 {
        self.shared.borrow().sequence.progress()
    }

    pub fn phase(&self) -> BootPhase {
        self.shared.borrow().sequence.phase()
    }

    pub fn ticks(&self) -> u32 {
        self.shared.borrow().sequence.ticks()
    }

    pub fn label(&self) -> String {
        self.shared.borrow().sequence.label()
    }

    /// True once the completion callback has been delivered.
    pub fn is_finished(&self) -> bool {
        self.shared.borrow().finished
    }

    pub fn teardown(self) {}
}

impl Drop for BootController {
    fn drop(&mut self) {
        let (ticker, hold) = {
            let mut s = self.shared.borrow_mut();
            s.torn_down = true;
            s.on_progress = None;
            s.on_complete = None;
            (s.ticker.take(), s.hold.take())
        };
        // Cancel outside the borrow; a cancel hook may re-enter the scheduler.
        drop(ticker);
        drop(hold);
        tracing::debug!("boot controller torn down");
    }
}

fn tick(weak: &Weak<RefCell<BootShared>>, scheduler: &dyn Scheduler, hold_ms: u32) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let step = {
        let mut s = shared.borrow_mut();
        if s.torn_down {
            return;
        }
        s.sequence.step()
    };

    match step {
        BootStep::Advanced(p) => {
            tracing::debug!(progress = p, "boot tick");
            notify_progress(&shared, p);
        }
        BootStep::Completed => {
            tracing::info!("boot progress reached 100");
            notify_progress(&shared, COMPLETE_PERCENT);
            let mut s = shared.borrow_mut();
            if s.torn_down {
                return;
            }
            if let Some(ticker) = s.ticker.as_mut() {
                ticker.cancel();
            }
            let weak = weak.clone();
            match scheduler.after(hold_ms, Box::new(move || finish(&weak))) {
                Ok(hold) => s.hold = Some(hold),
                Err(err) => tracing::error!(%err, "failed to schedule boot completion"),
            }
        }
        BootStep::Idle => {}
    }
}

fn notify_progress(shared: &Rc<RefCell<BootShared>>, progress: u8) {
    // The callback runs without a borrow held so it may query the controller.
    let Some(mut cb) = shared.borrow_mut().on_progress.take() else {
        return;
    };
    cb(progress);
    let mut s = shared.borrow_mut();
    if !s.torn_down && s.on_progress.is_none() {
        s.on_progress = Some(cb);
    }
}

fn finish(weak: &Weak<RefCell<BootShared>>) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let on_complete = {
        let mut s = shared.borrow_mut();
        if s.torn_down || s.finished {
            return;
        }
        s.finished = true;
        s.on_complete.take()
    };
    tracing::info!("boot sequence complete");
    if let Some(cb) = on_complete {
        cb();
    }
}
