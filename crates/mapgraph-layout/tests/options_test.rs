use mapgraph_core::LayoutConfig;
use mapgraph_layout::{
    Direction, LayoutError, LayoutOptions, LayoutScope, LayoutStrategyKind, StrategyRegistry,
};

#[test]
fn strategy_kinds_parse_and_display_round_trip() {
    for kind in LayoutStrategyKind::ALL {
        assert_eq!(kind.to_string().parse::<LayoutStrategyKind>(), Ok(kind));
    }
    assert_eq!(
        " Force-Directed ".parse::<LayoutStrategyKind>(),
        Ok(LayoutStrategyKind::ForceDirected)
    );
    assert_eq!(
        "spiral".parse::<LayoutStrategyKind>(),
        Err(LayoutError::UnknownStrategyName {
            name: "spiral".to_string()
        })
    );
    assert_eq!(
        serde_json::to_string(&LayoutStrategyKind::ForceDirected).unwrap(),
        "\"force-directed\""
    );
}

#[test]
fn scopes_parse() {
    assert_eq!("all".parse::<LayoutScope>(), Ok(LayoutScope::All));
    assert_eq!("new-only".parse::<LayoutScope>(), Ok(LayoutScope::NewOnly));
    assert!(matches!(
        "some".parse::<LayoutScope>(),
        Err(LayoutError::UnknownScope { .. })
    ));
}

#[test]
fn default_registry_has_every_strategy() {
    let registry = StrategyRegistry::default();
    assert_eq!(registry.kinds(), LayoutStrategyKind::ALL.to_vec());
    for kind in LayoutStrategyKind::ALL {
        assert_eq!(registry.get(kind).map(|s| s.kind()), Some(kind));
    }
    assert!(StrategyRegistry::new().kinds().is_empty());
}

#[test]
fn config_overrides_defaults() {
    let config = LayoutConfig::from_json_str(
        r#"{
            // canvas
            width: 800,
            circular: { radius: 250, sortByDegree: false },
            stress: { iterations: 50, considerLabels: false },
            hierarchical: { direction: "LR", rankSep: 90 },
            force: { initialTemperature: 30 },
        }"#,
    )
    .unwrap();
    let opts = LayoutOptions::from_config(&config).unwrap();

    assert_eq!(opts.width, 800.0);
    assert_eq!(opts.height, 1000.0);
    assert_eq!(opts.circular.radius, Some(250.0));
    assert!(!opts.circular.sort_by_degree);
    assert_eq!(opts.circular.ring_gap, 150.0);
    assert_eq!(opts.stress.iterations, 50);
    assert!(!opts.stress.consider_labels);
    assert_eq!(opts.stress.node_node_spacing, 80.0);
    assert_eq!(opts.hierarchical.direction, Direction::LR);
    assert_eq!(opts.hierarchical.rank_sep, 90.0);
    assert_eq!(opts.force.initial_temperature, Some(30.0));
    assert_eq!(opts.force.iterations, 300);
}

#[test]
fn empty_config_yields_defaults() {
    let opts = LayoutOptions::from_config(&LayoutConfig::empty_object()).unwrap();
    assert_eq!(opts, LayoutOptions::default());
}

#[test]
fn config_type_and_range_errors_are_reported() {
    let wrong_type = LayoutConfig::from_json_str(r#"{ width: "wide" }"#).unwrap();
    assert!(matches!(
        LayoutOptions::from_config(&wrong_type),
        Err(LayoutError::InvalidOptions { .. })
    ));

    let negative = LayoutConfig::from_json_str(r#"{ stress: { nodeNodeSpacing: -1 } }"#).unwrap();
    let err = LayoutOptions::from_config(&negative).unwrap_err();
    assert!(err.to_string().contains("stress.nodeNodeSpacing"), "{err}");

    let direction = LayoutConfig::from_json_str(r#"{ hierarchical: { direction: "up" } }"#).unwrap();
    assert!(LayoutOptions::from_config(&direction).is_err());

    for text in [
        r#"{ stress: { iterations: -5 } }"#,
        r#"{ stress: { iterations: "many" } }"#,
        r#"{ stress: { considerLabels: 1 } }"#,
        r#"{ circular: { sortByDegree: "false" } }"#,
        r#"{ hierarchical: { direction: 3 } }"#,
        r#"{ hierarchical: { sweeps: 2.5 } }"#,
        r#"{ force: { iterations: true } }"#,
    ] {
        let config = LayoutConfig::from_json_str(text).unwrap();
        assert!(
            matches!(
                LayoutOptions::from_config(&config),
                Err(LayoutError::InvalidOptions { .. })
            ),
            "{text} was accepted"
        );
    }
}

#[test]
fn options_deserialize_from_camel_case_json() {
    let opts: LayoutOptions = serde_json::from_str(
        r#"{ "width": 640, "stress": { "edgeEdgeSpacing": 5 }, "hierarchical": { "direction": "LR" } }"#,
    )
    .unwrap();
    assert_eq!(opts.width, 640.0);
    assert_eq!(opts.stress.edge_edge_spacing, 5.0);
    assert_eq!(opts.stress.iterations, 300);
    assert_eq!(opts.hierarchical.direction, Direction::LR);
}
