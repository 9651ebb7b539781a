//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SLOTIFY_TIMEZONE`: IANA timezone name (e.g. `Asia/Kolkata`)
//! - `SLOTIFY_EXTRACTION_MODEL`: Model identifier for the extraction service
//! - `SLOTIFY_MAX_OUTPUT_TOKENS`: Extraction response token cap (optional)
//! - `SLOTIFY_CALENDAR_ID`: Calendar to read from and write to
//! - `SLOTIFY_RESPONSE_SEED`: Seed for the canned-reply rotation (optional)
//!
//! API credentials (`SLOTIFY_GEMINI_API_KEY`, `SLOTIFY_GCAL_ACCESS_TOKEN`)
//! are read by the application context, not through this loader; they are
//! never part of the serialized `Config`.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./slotify.json` or `./slotify.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use slotify_domain::{CalendarConfig, Config, ExtractionConfig, Result, SlotifyError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file, and
/// finally to the built-in defaults.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None).or_else(|file_err| {
                tracing::debug!(error = ?file_err, "No config file found, using defaults");
                Ok(Config::default())
            })
        }
    }
}

/// Load configuration from environment variables
///
/// `SLOTIFY_TIMEZONE`, `SLOTIFY_EXTRACTION_MODEL` and `SLOTIFY_CALENDAR_ID`
/// must all be present; the remaining variables default.
///
/// # Errors
/// Returns `SlotifyError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let timezone = env_var("SLOTIFY_TIMEZONE")?;
    let model = env_var("SLOTIFY_EXTRACTION_MODEL")?;
    let calendar_id = env_var("SLOTIFY_CALENDAR_ID")?;

    let max_output_tokens = match std::env::var("SLOTIFY_MAX_OUTPUT_TOKENS") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| SlotifyError::Config(format!("Invalid max output tokens: {}", e)))?,
        Err(_) => 512,
    };

    let response_seed = match std::env::var("SLOTIFY_RESPONSE_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| SlotifyError::Config(format!("Invalid response seed: {}", e)))?,
        ),
        Err(_) => None,
    };

    let config = Config {
        timezone,
        extraction: ExtractionConfig { model, max_output_tokens },
        calendar: CalendarConfig { calendar_id },
        response_seed,
    };
    // Reject bad zone names at load time instead of on the first request
    config.tz()?;

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SlotifyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotifyError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotifyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotifyError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.tz()?;
    Ok(config)
}

/// Parse configuration from string content, with the format detected by file
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotifyError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotifyError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SlotifyError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files and return the first that
/// exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("slotify.json"),
            cwd.join("slotify.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("slotify.json"),
                exe_dir.join("slotify.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SlotifyError::Config(format!("Missing required environment variable: {}", key))
    })
}
