use krea_web::motion::{self, Ease, GlitchLoop, LoopTrack};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn loop_track_wraps_every_period() {
    let track = LoopTrack::new(1000.0, 25.0);
    assert!(close(track.offset(0.0), 0.0));
    assert!(close(track.offset(12.5), -500.0));
    assert!(close(track.offset(25.0), 0.0));
    assert!(close(track.offset(37.5), -500.0));
    assert!(close(LoopTrack::new(1000.0, 0.0).offset(3.0), 0.0));
}

#[test]
fn parallax_is_clamped() {
    assert!(close(motion::hero_parallax(-50.0), 0.0));
    assert!(close(motion::hero_parallax(250.0), 100.0));
    assert!(close(motion::hero_parallax(500.0), 200.0));
    assert!(close(motion::hero_parallax(5_000.0), 200.0));
}

#[test]
fn glitch_bursts_then_rests() {
    let glitch = GlitchLoop::default();
    let start = glitch.sample(0.0);
    assert!(close(start.x, -2.0) && close(start.opacity, 0.2));
    let peak = glitch.sample(0.1);
    assert!(close(peak.x, 2.0) && close(peak.opacity, 0.5));
    let rest = glitch.sample(1.0);
    assert!(close(rest.x, -2.0) && close(rest.opacity, 0.2));
    // Next cycle starts after burst + rest.
    let again = glitch.sample(3.2 + 0.1);
    assert!(close(again.x, 2.0), "{again:?}");
}

#[test]
fn hero_entrance_front_loads_motion() {
    assert!(motion::HERO_ENTRANCE.apply(0.5) > Ease::Linear.apply(0.5));
    assert!(motion::BOOT_EXIT.apply(0.25) < 0.25);
    assert_eq!(Ease::Linear.to_css(), "linear");
}
