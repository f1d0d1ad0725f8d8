use std::f32::consts::FRAC_PI_4;

use krea_web::config::ParticleConfig;
use krea_web::particles::{Camera, ParticleField};

fn field(seed: u64) -> ParticleField {
    ParticleField::generate(&ParticleConfig::default(), &mut fastrand::Rng::with_seed(seed))
}

#[test]
fn dust_stays_inside_its_box_and_uses_the_palette() {
    let cfg = ParticleConfig::default();
    let f = field(3);
    assert_eq!(f.dust.len(), 20);
    for d in &f.dust {
        for (axis, extent) in d.position.iter().zip(cfg.dust_spread) {
            assert!(axis.abs() <= extent / 2.0, "{:?}", d.position);
        }
        assert!(cfg.palette.contains(&d.color));
    }
}

#[test]
fn stars_fill_a_thick_shell() {
    let f = field(11);
    assert_eq!(f.stars.len(), 3000);
    for s in &f.stars {
        let [x, y, z] = s.position;
        let r = (x * x + y * y + z * z).sqrt();
        assert!((99.9..=150.1).contains(&r), "radius {r}");
        assert!((2.0..=4.0).contains(&s.size), "size {}", s.size);
    }
}

#[test]
fn same_seed_same_field() {
    let (a, b) = (field(42), field(42));
    assert_eq!(a.dust, b.dust);
    assert_eq!(a.stars, b.stars);
    assert_ne!(field(43).dust, a.dust);
}

#[test]
fn rotation_drifts_with_time() {
    let mut f = field(1);
    assert_eq!(f.rotation, [0.0, 0.0, FRAC_PI_4]);
    f.advance(1.5);
    assert!((f.rotation[0] + 0.15).abs() < 1e-6);
    assert!((f.rotation[1] + 0.1).abs() < 1e-6);
    assert_eq!(f.rotation[2], FRAC_PI_4);
    assert!((f.elapsed - 1.5).abs() < 1e-6);
}

#[test]
fn float_pose_stays_small() {
    let mut f = field(5);
    for _ in 0..600 {
        f.advance(1.0 / 60.0);
        let pose = f.float_pose();
        assert!(pose.lift.abs() <= 0.05 + 1e-6);
        assert!(pose.rotation.iter().all(|r| r.abs() <= 0.0625 + 1e-6));
    }
}

#[test]
fn empty_palette_falls_back_to_white() {
    let cfg = ParticleConfig {
        palette: Vec::new(),
        ..ParticleConfig::default()
    };
    let f = ParticleField::generate(&cfg, &mut fastrand::Rng::with_seed(0));
    assert!(f.dust.iter().all(|d| d.color.to_hex() == "#ffffff"));
}

#[test]
fn vertical_framing_ignores_aspect() {
    let cam = Camera::new(5.0);
    let p = [0.5, 1.0, -10.0];
    let wide = cam.projection(1920.0 / 1080.0).transform_point(p);
    let tall = cam.projection(1080.0 / 1920.0).transform_point(p);
    assert!((wide[1] - tall[1]).abs() < 1e-6);
    assert!(tall[0] > wide[0]);
}

#[test]
fn degenerate_aspect_falls_back_to_square() {
    let cam = Camera::new(5.0);
    assert_eq!(cam.projection(0.0), cam.projection(1.0));
    assert_eq!(cam.projection(f32::NAN), cam.projection(1.0));
}
