// File: crates/chartframe/tests/animation.rs
// Purpose: Frame loop progress, cancellation, completion callbacks and easing curves.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chartframe::animation::FRAME_INTERVAL;
use chartframe::{Animation, AnimationBuilder, AnimationLength, AnimationOutcome, Easing, ManualClock, TickSource};

fn assert_close(got: f64, want: f64, eps: f64) {
    assert!((got - want).abs() <= eps, "{got} != {want} (eps {eps})");
}

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    (count, move || {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn finite_run_ends_with_exactly_one() {
    let clock = ManualClock::new();
    let (done, on_done) = counter();
    let mut seen = Vec::new();
    let outcome = AnimationBuilder::new(Duration::from_millis(1000))
        .clock(Arc::new(clock.clone()))
        .on_done(on_done)
        .run_blocking(|p| seen.push(p));

    assert_eq!(outcome, AnimationOutcome::Completed);
    assert_eq!(seen.first(), Some(&0.0));
    assert_eq!(seen.last(), Some(&1.0));
    assert_eq!(seen.iter().filter(|&&p| p == 1.0).count(), 1);
    for pair in seen.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    // one frame per interval plus the final call
    let frames = (Duration::from_millis(1000).as_nanos() as f64 / FRAME_INTERVAL.as_nanos() as f64).ceil() as usize;
    assert_eq!(seen.len(), frames + 1);
    assert_eq!(done.load(Ordering::SeqCst), 1);
    assert!(clock.now() >= Duration::from_millis(1000));
}

#[test]
fn stop_before_first_frame_skips_progress_but_completes_once() {
    let (done, on_done) = counter();
    let builder = AnimationBuilder::new(Duration::from_millis(1000))
        .clock(Arc::new(ManualClock::new()))
        .on_done(on_done);
    builder.stop_handle().stop();
    let mut seen = Vec::new();
    let outcome = builder.run_blocking(|p| seen.push(p));

    assert_eq!(outcome, AnimationOutcome::Stopped);
    assert!(seen.is_empty());
    assert_eq!(done.load(Ordering::SeqCst), 1);
}

#[test]
fn stop_mid_run_from_progress_callback() {
    let builder = AnimationBuilder::new(Duration::from_secs(10)).clock(Arc::new(ManualClock::new()));
    let stop = builder.stop_handle();
    let mut calls = 0;
    let outcome = builder.run_blocking(|_| {
        calls += 1;
        if calls == 3 {
            stop.stop();
        }
    });
    assert_eq!(outcome, AnimationOutcome::Stopped);
    assert_eq!(calls, 3);
}

#[test]
fn easing_shapes_progress() {
    let mut seen = Vec::new();
    AnimationBuilder::new(Duration::from_millis(200))
        .clock(Arc::new(ManualClock::new()))
        .easing(Easing::EaseIn)
        .run_blocking(|p| seen.push(p));
    // fourth frame is eased from its elapsed share of the span
    let mid = seen[3];
    assert_close(mid, Easing::EaseIn.apply(3.0 * FRAME_INTERVAL.as_secs_f64() / 0.2), 1e-9);
    assert_eq!(seen.last(), Some(&1.0));
}

#[test]
fn built_in_easings_hit_both_ends() {
    for easing in Easing::BUILT_IN {
        assert_close(easing.apply(0.0), 0.0, 1e-12);
        assert_close(easing.apply(1.0), 1.0, 1e-12);
        let mid = easing.apply(0.5);
        assert!((0.0..=1.0).contains(&mid), "{} at 0.5 = {mid}", easing.name());
    }
}

#[test]
fn easings_parse_by_name() {
    for easing in Easing::BUILT_IN {
        let parsed: Easing = easing.name().parse().expect("known easing");
        assert_eq!(parsed.name(), easing.name());
    }
    assert!("bounce".parse::<Easing>().is_err());
}

#[test]
fn spawned_forever_animation_stops_on_request() {
    let (done, on_done) = counter();
    let frames = Arc::new(Mutex::new(0usize));
    let f = Arc::clone(&frames);
    let mut ani = Animation::builder(AnimationLength::Forever)
        .on_done(on_done)
        .spawn(move |p| {
            assert!(p < 1.0);
            *f.lock().expect("frames") += 1;
        });
    std::thread::sleep(FRAME_INTERVAL * 3);
    assert!(!ani.is_finished());

    assert_eq!(ani.stop_and_wait().expect("join"), AnimationOutcome::Stopped);
    assert!(ani.is_finished());
    assert!(*frames.lock().expect("frames") >= 1);
    assert_eq!(done.load(Ordering::SeqCst), 1);
    // stopping again is harmless
    ani.stop();
    assert_eq!(ani.wait().expect("cached"), AnimationOutcome::Stopped);
}

#[test]
fn spawned_finite_animation_completes_on_virtual_time() {
    let (done, on_done) = counter();
    let last = Arc::new(Mutex::new(None));
    let l = Arc::clone(&last);
    let mut ani = Animation::builder(Duration::from_millis(500))
        .clock(Arc::new(ManualClock::new()))
        .on_done(on_done)
        .spawn(move |p| *l.lock().expect("last") = Some(p));
    assert_eq!(ani.wait().expect("join"), AnimationOutcome::Completed);
    assert_eq!(*last.lock().expect("last"), Some(1.0));
    assert_eq!(done.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_a_forever_handle_requests_stop() {
    let ani = Animation::start(AnimationLength::Forever, |_| {});
    let stop = ani.stop_handle();
    assert!(!stop.is_stopped());
    drop(ani);
    assert!(stop.is_stopped());
}

#[test]
fn dropped_finite_animation_runs_to_completion() {
    let (tx, rx) = std::sync::mpsc::channel();
    let done_tx = tx.clone();
    let ani = Animation::builder(Duration::from_millis(500))
        .clock(Arc::new(ManualClock::new()))
        .on_done(move || done_tx.send(None).expect("send done"))
        .spawn(move |p| tx.send(Some(p)).expect("send progress"));
    let stop = ani.stop_handle();
    drop(ani);
    assert!(!stop.is_stopped());

    let mut seen = Vec::new();
    loop {
        match rx.recv_timeout(Duration::from_secs(5)).expect("worker finishes") {
            Some(p) => seen.push(p),
            None => break,
        }
    }
    assert_eq!(seen.last(), Some(&1.0));
    assert_eq!(seen.iter().filter(|&&p| p == 1.0).count(), 1);
    // nothing after the completion callback
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
}
