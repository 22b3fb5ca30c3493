use code_review_engine::config::{self, Config, LogFormat};

fn with_env<K: AsRef<str>, V: AsRef<str>, F: FnOnce()>(pairs: &[(K, V)], f: F) {
    let saved: Vec<(String, Option<String>)> = pairs
        .iter()
        .map(|(k, _)| (k.as_ref().to_string(), std::env::var(k.as_ref()).ok()))
        .collect();
    for (k, v) in pairs.iter() {
        std::env::set_var(k.as_ref(), v.as_ref());
    }
    f();
    for (k, v) in saved {
        match v {
            Some(val) => std::env::set_var(k, val),
            None => std::env::remove_var(k),
        }
    }
}

#[test]
fn config_loads_from_env_then_json() {
    let td = tempfile::tempdir().unwrap();
    let cfg_file = td.path().join(".codereview.json");
    std::fs::write(&cfg_file, r#"{"log_format": "json", "pretty": true}"#).unwrap();

    with_env(
        &[
            ("CODEREVIEW_LOG", "debug"),
            ("CODEREVIEW_LOG_FORMAT", "text"),
            ("CODEREVIEW_LANGUAGE", "JavaScript"),
            ("CODEREVIEW_PRETTY", "0"),
            ("CODEREVIEW_CONFIG_FILE", &*cfg_file.to_string_lossy()),
        ],
        || {
            let cfg = config::load_config();
            // Env values stay where the file is silent
            assert_eq!(cfg.log_level, "debug");
            assert_eq!(cfg.default_language, "javascript");
            // File overrides env
            assert_eq!(cfg.log_format, LogFormat::Json);
            assert!(cfg.pretty);
        },
    );
}

#[test]
fn malformed_or_missing_file_keeps_values() {
    let td = tempfile::tempdir().unwrap();
    let bad = td.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    let mut cfg = Config::default();
    assert!(!config::apply_config_file(&mut cfg, &bad));
    assert!(!config::apply_config_file(&mut cfg, &td.path().join("absent.json")));
    assert_eq!(cfg, Config::default());
}

#[test]
fn file_values_are_applied() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("cfg.json");
    std::fs::write(&path, r#"{"log_level": "info", "default_language": " Python "}"#).unwrap();

    let mut cfg = Config::default();
    assert!(config::apply_config_file(&mut cfg, &path));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.default_language, "python");
    assert_eq!(cfg.log_format, LogFormat::Text);
}
