use crate::config::{ConfigError, DEFAULT_MAX_NODES, DEFAULT_WARN_NODES, RoutingConfig};

#[test]
fn defaults() {
    let cfg = RoutingConfig::default();
    assert_eq!(cfg.max_nodes, DEFAULT_MAX_NODES);
    assert_eq!(cfg.max_nodes, 40_000);
    assert_eq!(cfg.warn_nodes, DEFAULT_WARN_NODES);
    assert_eq!(cfg.hash_seed, 0);
    assert!(cfg.validate().is_ok());
    assert_eq!(RoutingConfig::from_json_str("{}").unwrap(), cfg);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = RoutingConfig::from_json_str(r#"{ "hash_seed": 42 }"#).unwrap();
    assert_eq!(cfg.hash_seed, 42);
    assert_eq!(cfg.max_nodes, DEFAULT_MAX_NODES);

    let cfg = RoutingConfig::from_json_str(r#"{ "max_nodes": 100, "warn_nodes": 50 }"#).unwrap();
    assert_eq!((cfg.max_nodes, cfg.warn_nodes), (100, 50));
}

#[test]
fn round_trips_through_json() {
    let cfg = RoutingConfig {
        max_nodes: 500,
        warn_nodes: 200,
        hash_seed: 7,
    };
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(RoutingConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn rejects_bad_input() {
    let err = RoutingConfig::from_json_str(r#"{ "max_nodes": 10, "warn_nodes": 20 }"#).unwrap_err();
    assert!(
        matches!(err, ConfigError::Thresholds { warn_nodes: 20, max_nodes: 10 }),
        "{err}"
    );

    let err = RoutingConfig::from_json_str(r#"{ "hash_seed": -1 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "{err}");

    let err = RoutingConfig::from_file("/nonexistent/routing.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err}");
}
