use std::path::Path;

/// Runtime settings for the command-line front end.
///
/// Analysis thresholds are fixed constants and are not read from here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub default_language: String,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            default_language: "python".to_string(),
            pretty: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Defaults, then `CODEREVIEW_*` environment variables, then the JSON file
/// named by `CODEREVIEW_CONFIG_FILE` (or `.codereview.json` in the CWD).
pub fn load_config() -> Config {
    let mut cfg = Config::default();

    if let Ok(val) = std::env::var("CODEREVIEW_LOG") {
        if !val.trim().is_empty() {
            cfg.log_level = val.trim().to_string();
        }
    }

    if let Ok(val) = std::env::var("CODEREVIEW_LOG_FORMAT") {
        cfg.log_format = LogFormat::parse(&val);
    }

    if let Ok(val) = std::env::var("CODEREVIEW_LANGUAGE") {
        if !val.trim().is_empty() {
            cfg.default_language = val.trim().to_ascii_lowercase();
        }
    }

    if let Ok(val) = std::env::var("CODEREVIEW_PRETTY") {
        cfg.pretty = parse_flag(&val);
    }

    let cfg_path = std::env::var("CODEREVIEW_CONFIG_FILE")
        .ok()
        .unwrap_or_else(|| ".codereview.json".to_string());
    apply_config_file(&mut cfg, Path::new(&cfg_path));

    cfg
}

/// Overlay values from a JSON file. Missing or malformed files leave `cfg` untouched.
pub fn apply_config_file(cfg: &mut Config, path: &Path) -> bool {
    let Ok(text) = std::fs::read_to_string(path) else {
        return false;
    };
    let json = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            return false;
        }
    };

    if let Some(level) = json.get("log_level").and_then(|v| v.as_str()) {
        cfg.log_level = level.to_string();
    }
    if let Some(format) = json.get("log_format").and_then(|v| v.as_str()) {
        cfg.log_format = LogFormat::parse(format);
    }
    if let Some(lang) = json.get("default_language").and_then(|v| v.as_str()) {
        if !lang.trim().is_empty() {
            cfg.default_language = lang.trim().to_ascii_lowercase();
        }
    }
    if let Some(pretty) = json.get("pretty").and_then(|v| v.as_bool()) {
        cfg.pretty = pretty;
    }
    true
}
