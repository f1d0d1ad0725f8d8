use krea_web::{SiteConfig, SiteError};

#[test]
fn empty_object_is_the_default_site() {
    let cfg = SiteConfig::from_json("{}").unwrap();
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.boot.tick_ms, 150);
    assert_eq!(cfg.boot.hold_ms, 800);
    assert_eq!(cfg.boot.increment_range(), 1..=10);
    assert_eq!(cfg.particles.dust_count, 20);
    assert_eq!(cfg.particles.star_count, 3000);
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_overrides_keep_remaining_defaults() {
    let cfg = SiteConfig::from_json(
        r##"{
            "boot": { "tick_ms": 40 },
            "particles": { "palette": ["#ffffff"], "fog_far": 30.0 },
            "seed": 7
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.boot.tick_ms, 40);
    assert_eq!(cfg.boot.hold_ms, 800);
    assert_eq!(cfg.particles.palette.len(), 1);
    assert_eq!(cfg.particles.palette[0].to_hex(), "#ffffff");
    assert_eq!(cfg.particles.fog_far, 30.0);
    assert_eq!(cfg.particles.fog_near, 5.0);
    assert_eq!(cfg.seed, Some(7));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SiteConfig::from_json(r#"{ "boot": { "tick": 10 } }"#).unwrap_err();
    assert!(matches!(err, SiteError::Serde(_)), "{err:?}");
}

#[test]
fn malformed_colors_are_rejected() {
    let err = SiteConfig::from_json(r##"{ "particles": { "fog_color": "#12345" } }"##).unwrap_err();
    assert!(matches!(err, SiteError::Serde(_)), "{err:?}");
}

#[test]
fn invalid_values_fail_validation() {
    let cases = [
        r#"{ "boot": { "tick_ms": 0 } }"#,
        r#"{ "boot": { "min_increment": 0 } }"#,
        r#"{ "boot": { "min_increment": 8, "max_increment": 4 } }"#,
        r#"{ "boot": { "max_increment": 101 } }"#,
        r#"{ "particles": { "palette": [] } }"#,
        r#"{ "particles": { "dust_spread": [1.0, -1.0, 1.0] } }"#,
        r#"{ "particles": { "dust_opacity": 1.5 } }"#,
        r#"{ "particles": { "fog_near": 20.0, "fog_far": 20.0 } }"#,
        r#"{ "marquee": { "ticker_secs": 0.0 } }"#,
    ];
    for json in cases {
        match SiteConfig::from_json(json) {
            Err(SiteError::Config(_)) => {}
            other => panic!("{json}: expected config error, got {other:?}"),
        }
    }
}

#[test]
fn serialized_default_parses_back() {
    let text = serde_json::to_string(&SiteConfig::default()).unwrap();
    assert!(text.contains("\"#8b5cf6\""));
    assert_eq!(SiteConfig::from_json(&text).unwrap(), SiteConfig::default());
}

#[test]
fn boot_section_validates_on_its_own() {
    use krea_web::config::BootConfig;

    assert!(BootConfig::default().validate().is_ok());
    let inverted = BootConfig {
        min_increment: 8,
        max_increment: 4,
        ..BootConfig::default()
    };
    assert!(matches!(inverted.validate(), Err(SiteError::Config(_))));
}
