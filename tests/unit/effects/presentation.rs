use super::*;

#[test]
fn builtins_are_registered() {
    let reg = PresentationRegistry::with_builtins();
    let names: Vec<&str> = reg.names().collect();
    assert_eq!(
        names,
        vec!["clock_wipe", "cut", "fade", "flip", "iris", "slide", "wipe"]
    );
    assert!(PresentationRegistry::default().contains("fade"));
    assert!(PresentationRegistry::empty().names().next().is_none());
}

#[test]
fn names_are_case_insensitive_and_trimmed() {
    let reg = PresentationRegistry::with_builtins();
    assert!(reg.contains("  Fade "));
    assert!(reg.instantiate("SLIDE", &serde_json::Value::Null).is_ok());
}

#[test]
fn unknown_name_is_reported_canonically() {
    let reg = PresentationRegistry::with_builtins();
    let err = reg
        .instantiate(" Dissolve", &serde_json::Value::Null)
        .unwrap_err();
    match err {
        SegueError::UnknownPresentation(name) => assert_eq!(name, "dissolve"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_name_is_a_validation_error() {
    let reg = PresentationRegistry::with_builtins();
    let err = reg.instantiate("   ", &serde_json::Value::Null).unwrap_err();
    assert!(matches!(err, SegueError::Validation(_)));
}

#[test]
fn non_object_params_are_rejected() {
    let reg = PresentationRegistry::with_builtins();
    for kind in ["fade", "slide", "flip"] {
        let err = reg.instantiate(kind, &serde_json::json!(3)).unwrap_err();
        assert!(
            err.to_string().contains("params must be an object"),
            "{kind}: {err}"
        );
    }
    assert!(reg.instantiate("fade", &serde_json::json!({})).is_ok());
}

#[test]
fn edge_aliases() {
    let cases = [
        ("from_left", Edge::Left),
        ("LTR", Edge::Left),
        ("right_to_left", Edge::Right),
        ("top", Edge::Top),
        ("bottomtotop", Edge::Bottom),
    ];
    for (alias, want) in cases {
        let params = serde_json::json!({ "direction": alias });
        let got = parse_edge("slide", params.as_object(), Edge::Right).unwrap();
        assert_eq!(got, want, "{alias}");
    }
    assert_eq!(parse_edge("slide", None, Edge::Top).unwrap(), Edge::Top);
}

#[test]
fn bad_direction_is_rejected() {
    let params = serde_json::json!({ "direction": "diagonal" });
    let err = parse_edge("wipe", params.as_object(), Edge::Left).unwrap_err();
    assert!(err.to_string().contains("wipe.direction"));

    let params = serde_json::json!({ "direction": 1 });
    assert!(parse_edge("wipe", params.as_object(), Edge::Left).is_err());
}

#[test]
fn positive_number_params() {
    let params = serde_json::json!({ "perspective": 800.0 });
    assert_eq!(
        parse_positive_f64("flip", "perspective", params.as_object(), 1000.0).unwrap(),
        800.0
    );
    assert_eq!(
        parse_positive_f64("flip", "perspective", None, 1000.0).unwrap(),
        1000.0
    );
    let params = serde_json::json!({ "perspective": -1.0 });
    assert!(parse_positive_f64("flip", "perspective", params.as_object(), 1000.0).is_err());
}

#[derive(Debug)]
struct Dim(f64);

impl Presentation for Dim {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        match direction {
            Direction::Entering => StyleDescriptor::with_opacity(progress * self.0),
            Direction::Exiting => StyleDescriptor::with_opacity((1.0 - progress) * self.0),
            Direction::Steady => StyleDescriptor::identity(),
        }
    }
}

#[test]
fn custom_static_presentation() {
    let mut reg = PresentationRegistry::empty();
    reg.register_static("Dim", Dim(1.0));
    assert!(reg.contains("dim"));
    let p = reg.instantiate("dim", &serde_json::Value::Null).unwrap();
    assert_eq!(p.style(0.5, Direction::Entering).opacity, 0.5);
    assert!(reg.instantiate("dim", &serde_json::json!("x")).is_err());
}

#[test]
fn custom_factory_reads_params() {
    let mut reg = PresentationRegistry::empty();
    reg.register("dim", |params| {
        let p = params_object("dim", params)?;
        let peak = parse_positive_f64("dim", "peak", p, 1.0)?;
        Ok(Arc::new(Dim(peak)) as Arc<dyn Presentation>)
    });
    let p = reg
        .instantiate("dim", &serde_json::json!({ "peak": 0.5 }))
        .unwrap();
    assert_eq!(p.style(1.0, Direction::Entering).opacity, 0.5);

    // Re-registering replaces the previous factory.
    reg.register_static("dim", Dim(1.0));
    let p = reg.instantiate("dim", &serde_json::Value::Null).unwrap();
    assert_eq!(p.style(1.0, Direction::Entering).opacity, 1.0);
}
