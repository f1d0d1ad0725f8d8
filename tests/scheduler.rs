use std::cell::RefCell;
use std::rc::Rc;

use krea_web::{Scheduler, TimerHandle, VirtualScheduler};

type Log = Rc<RefCell<Vec<(u64, &'static str)>>>;

fn logger(sched: &VirtualScheduler, log: &Log, tag: &'static str) -> impl FnMut() + 'static {
    let sched = sched.clone();
    let log = log.clone();
    move || log.borrow_mut().push((sched.now(), tag))
}

#[test]
fn callbacks_run_in_due_order_with_creation_tiebreak() {
    let sched = VirtualScheduler::new();
    let log: Log = Rc::default();

    let mut late = logger(&sched, &log, "late");
    let mut first = logger(&sched, &log, "first");
    let mut second = logger(&sched, &log, "second");
    let _a = sched.after(30, Box::new(move || late())).unwrap();
    let _b = sched.after(10, Box::new(move || first())).unwrap();
    let _c = sched.after(10, Box::new(move || second())).unwrap();

    sched.advance(100);
    assert_eq!(*log.borrow(), vec![(10, "first"), (10, "second"), (30, "late")]);
    assert_eq!(sched.now(), 100);
}

#[test]
fn interval_repeats_until_cancelled() {
    let sched = VirtualScheduler::new();
    let log: Log = Rc::default();

    let mut handle = sched.every(25, Box::new(logger(&sched, &log, "tick"))).unwrap();
    sched.advance(100);
    let times: Vec<u64> = log.borrow().iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![25, 50, 75, 100]);

    handle.cancel();
    sched.advance(100);
    assert_eq!(log.borrow().len(), 4);
}

#[test]
fn interval_can_cancel_itself_from_inside() {
    let sched = VirtualScheduler::new();
    let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::default();
    let count = Rc::new(RefCell::new(0));

    let handle = {
        let slot = slot.clone();
        let count = count.clone();
        sched
            .every(
                10,
                Box::new(move || {
                    *count.borrow_mut() += 1;
                    if *count.borrow() == 3 {
                        if let Some(handle) = slot.borrow_mut().as_mut() {
                            handle.cancel();
                        }
                    }
                }),
            )
            .unwrap()
    };
    *slot.borrow_mut() = Some(handle);

    sched.advance(1_000);
    assert_eq!(*count.borrow(), 3);
    assert_eq!(sched.pending(), 0);
}

#[test]
fn callbacks_may_schedule_more_work_inside_the_window() {
    let sched = VirtualScheduler::new();
    let log: Log = Rc::default();
    let keep: Rc<RefCell<Vec<TimerHandle>>> = Rc::default();

    let _outer = {
        let sched2 = sched.clone();
        let log = log.clone();
        let keep = keep.clone();
        sched
            .after(
                10,
                Box::new(move || {
                    let inner = sched2
                        .after(5, Box::new(logger(&sched2, &log, "inner")))
                        .unwrap();
                    keep.borrow_mut().push(inner);
                }),
            )
            .unwrap()
    };

    sched.advance(20);
    assert_eq!(*log.borrow(), vec![(15, "inner")]);
}

#[test]
fn zero_period_interval_still_advances_time() {
    let sched = VirtualScheduler::new();
    let log: Log = Rc::default();
    let _h = sched.every(0, Box::new(logger(&sched, &log, "tick"))).unwrap();
    sched.advance(3);
    assert_eq!(log.borrow().len(), 3);
}
