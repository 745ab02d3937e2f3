//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LoganonConfig;
use crate::domain::errors::LoganonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LoganonConfig
/// 4. Applies environment variable overrides (LOGANON_* prefix)
/// 5. Validates the configuration, including the line pattern
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use loganon::config::loader::load_config;
///
/// let config = load_config("loganon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LoganonConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoganonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LoganonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access.
pub fn parse_config(contents: &str) -> Result<LoganonConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: LoganonConfig = toml::from_str(&contents)
        .map_err(|e| LoganonError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Applies environment overrides and validates
///
/// Used directly when running on built-in defaults without a file.
/// Well-formed configuration that fails a check is reported as
/// [`LoganonError::Validation`].
pub fn finalize(mut config: LoganonConfig) -> Result<LoganonConfig> {
    apply_env_overrides(&mut config)?;
    config.anonymization.apply_default_fields();

    config.validate().map_err(LoganonError::Validation)?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }

        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let processed_line = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(LoganonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool(name: &str, val: &str) -> Result<bool> {
    val.trim().to_lowercase().parse().map_err(|_| {
        LoganonError::Configuration(format!("Invalid boolean '{}' in {}", val, name))
    })
}

/// Applies environment variable overrides using LOGANON_* prefix
///
/// Environment variables follow the pattern: LOGANON_<SECTION>_<KEY>
/// For example: LOGANON_INPUT_PATH_PATTERN, LOGANON_PATTERN_UNMATCHED
fn apply_env_overrides(config: &mut LoganonConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LOGANON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("LOGANON_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("LOGANON_APPLICATION_DRY_RUN", &val)?;
    }

    // Input overrides
    if let Ok(val) = std::env::var("LOGANON_INPUT_PATH_PATTERN") {
        config.input.path_pattern = val;
    }
    if let Ok(val) = std::env::var("LOGANON_INPUT_SUFFIX") {
        config.input.suffix = val;
    }

    // Pattern overrides
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| LoganonError::Configuration(format!("{:#}", e)))?;

    // Logging overrides
    if let Ok(val) = std::env::var("LOGANON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("LOGANON_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("LOGANON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
