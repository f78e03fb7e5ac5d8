// Configuration loading and parsing (draft.toml, credentials.toml).

use chrono::Datelike;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub draft: DraftConfig,
    pub pool: PoolConfig,
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftConfig,
    pool: PoolConfig,
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    /// Number of teams a new draft starts with.
    pub num_teams: usize,
    /// Names applied to the first teams of every new draft. Teams without an
    /// entry keep their default "Team N" name.
    #[serde(default)]
    pub team_names: Vec<String>,
}

/// Where the ranked golfer list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSourceKind {
    File,
    Api,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    pub source: PoolSourceKind,
    /// Rankings file (JSON or CSV) for the `file` source.
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_tier_count")]
    pub tier_count: usize,
    #[serde(default = "default_tier_size")]
    pub tier_size: usize,
}

/// Upper bounds for the tier partition; rankings lists run to a few hundred.
const MAX_TIER_COUNT: usize = 50;
const MAX_TIER_SIZE: usize = 1000;

fn default_tier_count() -> usize {
    4
}

fn default_tier_size() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSection {
    #[serde(default = "default_api_host")]
    host: String,
    #[serde(default = "default_stat_id")]
    stat_id: String,
    /// Season to rank; the current year when omitted.
    #[serde(default)]
    year: Option<i32>,
}

impl Default for ApiSection {
    fn default() -> Self {
        ApiSection {
            host: default_api_host(),
            stat_id: default_stat_id(),
            year: None,
        }
    }
}

fn default_api_host() -> String {
    "live-golf-data.p.rapidapi.com".to_string()
}

fn default_stat_id() -> String {
    "186".to_string()
}

/// Rankings API settings with the season resolved.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub stat_id: String,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub rapidapi_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` and (optionally)
/// `config/credentials.toml`, both relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- draft.toml (required) ---
    let draft_path = config_dir.join("draft.toml");
    let draft_text = read_file(&draft_path)?;
    let draft_file: DraftFile =
        toml::from_str(&draft_text).map_err(|e| ConfigError::ParseError {
            path: draft_path.clone(),
            source: e,
        })?;

    let api = ApiConfig {
        host: draft_file.api.host,
        stat_id: draft_file.api.stat_id,
        year: draft_file
            .api
            .year
            .unwrap_or_else(|| chrono::Local::now().year()),
    };

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        draft: draft_file.draft,
        pool: draft_file.pool,
        api,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.draft.num_teams < 2 {
        return Err(ConfigError::ValidationError {
            field: "draft.num_teams".into(),
            message: format!("must be at least 2, got {}", config.draft.num_teams),
        });
    }

    if config.draft.team_names.len() > config.draft.num_teams {
        return Err(ConfigError::ValidationError {
            field: "draft.team_names".into(),
            message: format!(
                "{} names given for {} teams",
                config.draft.team_names.len(),
                config.draft.num_teams
            ),
        });
    }

    let pool_fields: &[(&str, usize)] = &[
        ("pool.tier_count", config.pool.tier_count),
        ("pool.tier_size", config.pool.tier_size),
    ];
    for (name, val) in pool_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }
    if config.pool.tier_count > MAX_TIER_COUNT {
        return Err(ConfigError::ValidationError {
            field: "pool.tier_count".into(),
            message: format!("must be at most {MAX_TIER_COUNT}, got {}", config.pool.tier_count),
        });
    }
    if config.pool.tier_size > MAX_TIER_SIZE {
        return Err(ConfigError::ValidationError {
            field: "pool.tier_size".into(),
            message: format!("must be at most {MAX_TIER_SIZE}, got {}", config.pool.tier_size),
        });
    }

    if config.pool.source == PoolSourceKind::File && config.pool.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "pool.path".into(),
            message: "required when pool.source = \"file\"".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
