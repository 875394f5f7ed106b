// Configuration loading and parsing (strategy.toml, squad.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use fpl_core::selection::DraftParams;

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
    pub data_paths: DataPaths,
    pub draft: DraftConfig,
    pub transfers: TransferConfig,
    pub seed: Option<u64>,
    /// Currently owned squad; empty when squad.toml is absent.
    pub squad: Vec<String>,
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    data: DataPaths,
    draft: DraftConfig,
    transfers: TransferConfig,
    #[serde(default)]
    random: RandomSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    pub save_per_starter: f64,
    pub plus_stars: usize,
    pub budget: f64,
    pub bench_budget: f64,
    pub play_time: f64,
}

impl DraftConfig {
    pub fn to_params(&self) -> DraftParams {
        DraftParams {
            save_per_starter: self.save_per_starter,
            plus_stars: self.plus_stars,
            budget: self.budget,
            bench_budget: self.bench_budget,
            min_play_fraction: self.play_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferConfig {
    pub results_length: usize,
    pub play_time: f64,
    #[serde(default)]
    pub extra_budget: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RandomSection {
    seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// squad.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
struct SquadFile {
    #[serde(default)]
    players: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/strategy.toml` and
/// (optionally) `config/squad.toml`, relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- strategy.toml (required) ---
    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    // --- squad.toml (optional) ---
    let squad_path = config_dir.join("squad.toml");
    let squad = if squad_path.exists() {
        let squad_text = read_file(&squad_path)?;
        toml::from_str(&squad_text).map_err(|e| ConfigError::ParseError {
            path: squad_path.clone(),
            source: e,
        })?
    } else {
        SquadFile::default()
    };

    let config = Config {
        data_paths: strategy.data,
        draft: strategy.draft,
        transfers: strategy.transfers,
        seed: strategy.random.seed,
        squad: squad.players,
    };

    validate(&config)?;

    Ok(config)
}

/// Files installed from `defaults/` on first run. `squad.toml` is the
/// user's own; its `.example` template is never installed.
const INSTALLED_DEFAULTS: [&str; 1] = ["strategy.toml"];

fn copy_error(what: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("failed to {what} {}: {e}", path.display()),
    }
}

/// Copy `src` to `dest` unless `dest` already exists. Returns whether a
/// copy happened.
fn install_if_missing(src: &Path, dest: &Path) -> Result<bool, ConfigError> {
    use std::fs::{File, OpenOptions};
    use std::io::ErrorKind;

    let mut out = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error("create", dest, e)),
    };
    let mut input = File::open(src).map_err(|e| copy_error("open", src, e))?;
    std::io::copy(&mut input, &mut out).map_err(|e| copy_error("write", dest, e))?;
    Ok(true)
}

/// Install any missing strategy defaults into `base_dir/config`.
/// Returns the paths written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (false, false) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the app directory or pass --base-dir",
                    base_dir.display()
                ),
            })
        }
        (false, true) => return Ok(vec![]),
        (true, _) => {}
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error("create directory", &config_dir, e))?;

    let mut installed = Vec::new();
    for name in INSTALLED_DEFAULTS {
        let src = defaults_dir.join(name);
        if !src.is_file() {
            continue;
        }
        let dest = config_dir.join(name);
        if install_if_missing(&src, &dest)? {
            info!("Installed default {}", dest.display());
            installed.push(dest);
        }
    }
    Ok(installed)
}

/// Copy any missing defaults into `base_dir/config`, then load.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let draft = &config.draft;
    if draft.budget <= 0.0 {
        return Err(invalid(
            "draft.budget",
            format!("must be > 0, got {}", draft.budget),
        ));
    }
    if draft.bench_budget <= 0.0 || draft.bench_budget >= draft.budget {
        return Err(invalid(
            "draft.bench_budget",
            format!(
                "must be > 0 and below draft.budget ({}), got {}",
                draft.budget, draft.bench_budget
            ),
        ));
    }
    if draft.save_per_starter < 0.0 {
        return Err(invalid(
            "draft.save_per_starter",
            format!("must be >= 0, got {}", draft.save_per_starter),
        ));
    }

    let fractions: &[(&str, f64)] = &[
        ("draft.play_time", draft.play_time),
        ("transfers.play_time", config.transfers.play_time),
    ];
    for (name, val) in fractions {
        if !(0.0..=1.0).contains(val) {
            return Err(invalid(
                name,
                format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            ));
        }
    }

    if config.transfers.results_length == 0 {
        return Err(invalid("transfers.results_length", "must be > 0".into()));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
