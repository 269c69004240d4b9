use crate::config::types::{BrokerConfig, Config, WorkerConfig, QUEUE_NAME};
use crate::config::validation::validate;
use crate::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the broker connection string
pub const ENV_BROKER_URL: &str = "RABBITMQ_URL";

/// Environment variable holding the receive timeout in seconds
pub const ENV_TIMEOUT: &str = "TIMEOUT";

/// Environment variable selecting durable queue + persistent messages
pub const ENV_QUEUE_DURABLE: &str = "QUEUE_DURABLE";

/// Loads configuration from the process environment
///
/// A `.env` file in the working directory is loaded first when present.
/// Variables already set in the process environment are never overridden.
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - A required variable is missing or a value is invalid
///
/// # Example
///
/// ```no_run
/// use frontier_ripple::config::load_config;
///
/// let config = load_config().unwrap();
/// println!("Queue: {}", config.broker.queue_name);
/// ```
pub fn load_config() -> Result<Config, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    load_config_from_lookup(|name| std::env::var(name).ok())
}

/// Loads configuration from an env file without touching the process environment
///
/// # Arguments
///
/// * `path` - Path to a file in `.env` format
pub fn load_config_from_file(path: &Path) -> Result<Config, ConfigError> {
    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        vars.insert(key, value);
    }

    load_config_from_lookup(|name| vars.get(name).cloned())
}

/// Builds a configuration from an arbitrary variable lookup
///
/// Empty values are treated the same as unset ones.
///
/// # Arguments
///
/// * `lookup` - Returns the value of a variable by name
pub fn load_config_from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let url = get(ENV_BROKER_URL).ok_or(ConfigError::Missing(ENV_BROKER_URL))?;

    let mut worker = WorkerConfig::default();
    if let Some(raw) = get(ENV_TIMEOUT) {
        let secs = raw.trim().parse::<u64>().map_err(|e| {
            ConfigError::Validation(format!(
                "{} must be a whole number of seconds, got '{}': {}",
                ENV_TIMEOUT, raw, e
            ))
        })?;
        worker.receive_timeout = Duration::from_secs(secs);
    }

    let durable = match get(ENV_QUEUE_DURABLE) {
        Some(raw) => parse_bool(ENV_QUEUE_DURABLE, &raw)?,
        None => false,
    };

    let config = Config {
        broker: BrokerConfig {
            url: url.trim().to_string(),
            queue_name: QUEUE_NAME.to_string(),
            durable,
        },
        worker,
    };

    validate(&config)?;

    Ok(config)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Validation(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
