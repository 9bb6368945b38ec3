use whub_domain::config::ApiConfig;

#[test]
fn defaults_are_sensible() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.server.port, 4710);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "whub");
    assert_eq!(cfg.database.database, "core");
    assert!(cfg.database.credentials.is_none());
}

#[test]
fn partial_config_fills_in_defaults() {
    let cfg: ApiConfig = serde_json::from_str(
        r#"{
            "server": { "port": 8080 },
            "database": { "url": "ws://localhost:8000" }
        }"#,
    )
    .expect("partial config should deserialize");

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "ws://localhost:8000");
    assert_eq!(cfg.database.namespace, "whub", "unset fields fall back to defaults");
}

#[test]
fn cloning_is_cheap_and_mutation_detaches() {
    let cfg = ApiConfig::default();
    let mut copy = cfg.clone();
    copy.server.port = 9999;

    assert_eq!(cfg.server.port, 4710);
    assert_eq!(copy.server.port, 9999);
}
