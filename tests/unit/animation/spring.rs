use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn starts_at_rest_and_converges_to_one() {
    let cfg = SpringConfig::default();
    assert_eq!(cfg.value_at_frame(0, fps30()), 0.0);
    assert!((cfg.value_at_frame(300, fps30()) - 1.0).abs() < 1e-6);
}

#[test]
fn default_spring_overshoots_unless_clamped() {
    let cfg = SpringConfig::default();
    let peak = (0..90)
        .map(|f| cfg.value_at_frame(f, fps30()))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::default()
    };
    for f in 0..90 {
        assert!(clamped.value_at_frame(f, fps30()) <= 1.0);
    }
}

#[test]
fn critically_damped_spring_is_monotonic() {
    let cfg = SpringConfig {
        stiffness: 100.0,
        damping: 20.0,
        mass: 1.0,
        overshoot_clamping: false,
    };
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-9);
    let mut prev = cfg.value_at_frame(0, fps30());
    for f in 1..120 {
        let v = cfg.value_at_frame(f, fps30());
        assert!(v >= prev);
        assert!(v <= 1.0);
        prev = v;
    }
}

#[test]
fn time_is_derived_from_fps() {
    let cfg = SpringConfig::default();
    let at_30 = cfg.value_at_frame(15, Fps::new(30, 1).unwrap());
    let at_60 = cfg.value_at_frame(30, Fps::new(60, 1).unwrap());
    assert!((at_30 - at_60).abs() < 1e-12);
}

#[test]
fn measure_spring_finds_first_frame_of_final_settled_run() {
    let cfg = SpringConfig::default();
    let threshold = 0.005;
    let n = measure_spring(&cfg, fps30(), threshold).unwrap();
    assert!(n > 10 && n < 60, "settled at {n}");
    for f in n..n + 300 {
        assert!((1.0 - cfg.value_at_frame(f, fps30())).abs() <= threshold);
    }
    assert!((1.0 - cfg.value_at_frame(n - 1, fps30())).abs() > threshold);
}

#[test]
fn measure_spring_rejects_undamped_and_bad_threshold() {
    let undamped = SpringConfig {
        damping: 0.0,
        ..SpringConfig::default()
    };
    assert_eq!(measure_spring(&undamped, fps30(), 0.01), None);
    assert_eq!(measure_spring(&SpringConfig::default(), fps30(), 0.0), None);
    assert_eq!(
        measure_spring(&SpringConfig::default(), fps30(), f64::NAN),
        None
    );
}

#[test]
fn validate_rejects_degenerate_parameters() {
    assert!(SpringConfig::default().validate().is_ok());
    for bad in [
        SpringConfig {
            stiffness: 0.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            mass: -1.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            damping: -0.5,
            ..SpringConfig::default()
        },
        SpringConfig {
            damping: f64::INFINITY,
            ..SpringConfig::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
