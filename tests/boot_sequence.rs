use std::cell::{Cell, RefCell};
use std::rc::Rc;

use krea_web::config::BootConfig;
use krea_web::{
    BootController, BootPhase, BootSequence, BootStep, Scheduler, ScriptedIncrements, SiteError,
    VirtualScheduler,
};

struct Harness {
    sched: VirtualScheduler,
    progress: Rc<RefCell<Vec<u8>>>,
    completions: Rc<RefCell<Vec<u64>>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            sched: VirtualScheduler::new(),
            progress: Rc::default(),
            completions: Rc::default(),
        }
    }

    fn activate(&self, source: ScriptedIncrements, config: &BootConfig) -> BootController {
        let dyn_sched: Rc<dyn Scheduler> = Rc::new(self.sched.clone());
        let progress = self.progress.clone();
        let completions = self.completions.clone();
        let clock = self.sched.clone();
        BootController::activate(
            dyn_sched,
            source,
            config,
            move |p| progress.borrow_mut().push(p),
            move || completions.borrow_mut().push(clock.now()),
        )
        .unwrap()
    }
}

#[test]
fn sequence_starts_at_zero_and_pins_at_100() {
    let cfg = BootConfig::default();
    let mut seq = BootSequence::new(ScriptedIncrements::new([10; 20]), &cfg);
    assert_eq!(seq.progress(), 0);
    assert_eq!(seq.phase(), BootPhase::Running);
    assert_eq!(seq.label(), "0%");

    for expected in (10..100).step_by(10) {
        assert_eq!(seq.step(), BootStep::Advanced(expected as u8));
    }
    assert_eq!(seq.step(), BootStep::Completed);
    assert_eq!(seq.progress(), 100);
    assert_eq!(seq.phase(), BootPhase::Complete);
    assert_eq!(seq.label(), "100%");
    assert_eq!(seq.fraction(), 1.0);

    assert_eq!(seq.step(), BootStep::Idle);
    assert_eq!(seq.step(), BootStep::Idle);
    assert_eq!(seq.progress(), 100);
    assert_eq!(seq.ticks(), 10);
}

#[test]
fn overshoot_is_clamped_to_exactly_100() {
    let cfg = BootConfig::default();
    let mut seq = BootSequence::new(ScriptedIncrements::new([9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 10]), &cfg);
    let mut last = 0;
    loop {
        match seq.step() {
            BootStep::Advanced(p) => last = p,
            BootStep::Completed => break,
            BootStep::Idle => panic!("idle before completion"),
        }
    }
    assert_eq!(last, 99);
    assert_eq!(seq.progress(), 100);
}

#[test]
fn increments_are_clamped_into_configured_range() {
    let cfg = BootConfig::default();
    let mut seq = BootSequence::new(ScriptedIncrements::new([0, 200]), &cfg);
    assert_eq!(seq.step(), BootStep::Advanced(1));
    assert_eq!(seq.step(), BootStep::Advanced(11));
}

#[test]
fn random_runs_are_monotonic_bounded_and_terminate() {
    let cfg = BootConfig::default();
    for seed in 0..64 {
        let mut seq = BootSequence::new(fastrand::Rng::with_seed(seed), &cfg);
        let mut prev = seq.progress();
        assert_eq!(prev, 0);
        while seq.phase() == BootPhase::Running {
            seq.step();
            let p = seq.progress();
            assert!(p >= prev, "seed {seed}: {p} < {prev}");
            assert!(p <= 100, "seed {seed}: {p} > 100");
            prev = p;
            assert!(seq.ticks() <= 100, "seed {seed}: too many ticks");
        }
        assert_eq!(seq.progress(), 100);
        assert!(seq.ticks() >= 10, "seed {seed}: finished in {} ticks", seq.ticks());
    }
}

#[test]
fn controller_completes_once_after_hold() {
    let h = Harness::new();
    let cfg = BootConfig::default();
    let controller = h.activate(ScriptedIncrements::new([10; 10]), &cfg);

    assert_eq!(controller.progress(), 0);
    h.sched.advance(150 * 9);
    assert_eq!(controller.progress(), 90);
    assert_eq!(controller.phase(), BootPhase::Running);

    h.sched.advance(150);
    assert_eq!(controller.progress(), 100);
    assert_eq!(controller.phase(), BootPhase::Complete);
    assert!(h.completions.borrow().is_empty());

    h.sched.advance(799);
    assert!(h.completions.borrow().is_empty());
    assert!(!controller.is_finished());

    h.sched.advance(1);
    assert_eq!(*h.completions.borrow(), vec![1500 + 800]);
    assert!(controller.is_finished());
    assert_eq!(
        *h.progress.borrow(),
        vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
    );

    // Nothing left to run and nothing changes afterwards.
    assert_eq!(h.sched.pending(), 0);
    h.sched.advance(10_000);
    assert_eq!(h.completions.borrow().len(), 1);
    assert_eq!(controller.progress(), 100);
    assert_eq!(controller.ticks(), 10);
    assert_eq!(h.progress.borrow().len(), 10);
}

#[test]
fn progress_samples_never_decrease() {
    let h = Harness::new();
    let cfg = BootConfig::default();
    let _controller = h.activate(ScriptedIncrements::new([3, 7, 1, 10, 4, 9, 2, 8, 5, 6, 10, 10, 10, 10, 10]), &cfg);
    h.sched.advance(150 * 100 + 800);

    let samples = h.progress.borrow();
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(samples.last(), Some(&100));
    assert_eq!(samples.iter().filter(|&&p| p == 100).count(), 1);
    assert_eq!(h.completions.borrow().len(), 1);
}

#[test]
fn teardown_before_first_tick_never_notifies() {
    let h = Harness::new();
    let controller = h.activate(ScriptedIncrements::new([10; 10]), &BootConfig::default());
    controller.teardown();

    h.sched.advance(100_000);
    assert!(h.progress.borrow().is_empty());
    assert!(h.completions.borrow().is_empty());
    assert_eq!(h.sched.pending(), 0);
}

#[test]
fn teardown_mid_run_stops_ticks() {
    let h = Harness::new();
    let controller = h.activate(ScriptedIncrements::new([10; 10]), &BootConfig::default());
    h.sched.advance(450);
    assert_eq!(*h.progress.borrow(), vec![10, 20, 30]);

    drop(controller);
    h.sched.advance(100_000);
    assert_eq!(h.progress.borrow().len(), 3);
    assert!(h.completions.borrow().is_empty());
}

#[test]
fn teardown_during_hold_cancels_completion() {
    let h = Harness::new();
    let controller = h.activate(ScriptedIncrements::new([50, 50]), &BootConfig::default());
    h.sched.advance(300);
    assert_eq!(controller.progress(), 100);
    assert_eq!(h.sched.pending(), 1, "only the hold timer remains");

    controller.teardown();
    assert_eq!(h.sched.pending(), 0);
    h.sched.advance(10_000);
    assert!(h.completions.borrow().is_empty());
}

#[test]
fn minimum_increments_finish_within_100_ticks() {
    let h = Harness::new();
    // Exhausted script falls back to the range minimum of 1.
    let controller = h.activate(ScriptedIncrements::default(), &BootConfig::default());
    h.sched.advance(150 * 99);
    assert_eq!(controller.progress(), 99);
    h.sched.advance(150);
    assert_eq!(controller.progress(), 100);
    assert_eq!(controller.ticks(), 100);
    h.sched.advance(800);
    assert_eq!(*h.completions.borrow(), vec![150 * 100 + 800]);
}

#[test]
fn custom_timing_is_honored() {
    let h = Harness::new();
    let cfg = BootConfig {
        tick_ms: 20,
        hold_ms: 5,
        ..BootConfig::default()
    };
    let _controller = h.activate(ScriptedIncrements::new([60, 60]), &cfg);
    h.sched.advance(1_000);
    assert_eq!(*h.completions.borrow(), vec![45]);
}

#[test]
fn completion_callback_may_drop_its_controller() {
    let sched = VirtualScheduler::new();
    let dyn_sched: Rc<dyn Scheduler> = Rc::new(sched.clone());
    let slot: Rc<RefCell<Option<BootController>>> = Rc::default();
    let fired = Rc::new(Cell::new(0));

    let controller = {
        let slot = slot.clone();
        let fired = fired.clone();
        BootController::activate(
            dyn_sched,
            ScriptedIncrements::new([100]),
            &BootConfig::default(),
            |_| {},
            move || {
                fired.set(fired.get() + 1);
                slot.borrow_mut().take();
            },
        )
        .unwrap()
    };
    *slot.borrow_mut() = Some(controller);

    sched.advance(150 + 800);
    assert_eq!(fired.get(), 1);
    assert!(slot.borrow().is_none());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn activate_rejects_inverted_increment_range() {
    let sched = VirtualScheduler::new();
    let dyn_sched: Rc<dyn Scheduler> = Rc::new(sched.clone());
    let cfg = BootConfig {
        min_increment: 8,
        max_increment: 4,
        ..BootConfig::default()
    };
    let result = BootController::activate(dyn_sched, fastrand::Rng::with_seed(1), &cfg, |_| {}, || {});
    assert!(matches!(result, Err(SiteError::Config(_))));
    assert_eq!(sched.pending(), 0);
    sched.advance(1_000);
}

#[test]
fn activate_rejects_zero_minimum_increment() {
    let sched = VirtualScheduler::new();
    let dyn_sched: Rc<dyn Scheduler> = Rc::new(sched.clone());
    let cfg = BootConfig {
        min_increment: 0,
        ..BootConfig::default()
    };
    let result = BootController::activate(dyn_sched, ScriptedIncrements::default(), &cfg, |_| {}, || {});
    assert!(matches!(result, Err(SiteError::Config(_))));
    assert_eq!(sched.pending(), 0);
}

#[test]
fn sequence_repairs_unvalidated_ranges() {
    let zero_min = BootConfig {
        min_increment: 0,
        ..BootConfig::default()
    };
    let mut seq = BootSequence::new(ScriptedIncrements::default(), &zero_min);
    for _ in 0..100 {
        seq.step();
    }
    assert_eq!(seq.phase(), BootPhase::Complete);

    let inverted = BootConfig {
        min_increment: 8,
        max_increment: 4,
        ..BootConfig::default()
    };
    let mut seq = BootSequence::new(fastrand::Rng::with_seed(9), &inverted);
    assert_eq!(seq.step(), BootStep::Advanced(8));
}
