use std::{fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const SETTINGS_FILE: &str = "dashboard.toml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
    pub initial_route: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            initial_route: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    log_filter: Option<String>,
    initial_route: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("base url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Defaults, then `dashboard.toml` (working directory first, then the user config dir),
/// then environment variables. Command-line flags are layered on top by the binaries.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = settings_file_candidates()
        .into_iter()
        .find_map(|path| fs::read_to_string(path).ok())
    {
        apply_file(&mut settings, &raw);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("insight-dashboard").join(SETTINGS_FILE));
    }
    candidates
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.initial_route {
        settings.initial_route = Some(v);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("DASHBOARD_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = lookup("DASHBOARD_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__INITIAL_ROUTE") {
        settings.initial_route = Some(v);
    }
}

/// Parses the backend origin. Blank input falls back to the default; the scheme must be http(s).
pub fn normalize_base_url(raw: &str) -> Result<Url, SettingsError> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_BASE_URL } else { raw };

    let url = Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme(raw.to_string()));
    }
    Ok(url)
}
