use crate::config::types::{BrokerConfig, Config, WorkerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_broker_config(&config.broker)?;
    validate_worker_config(&config.worker)?;
    Ok(())
}

/// Validates broker configuration
fn validate_broker_config(config: &BrokerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid RABBITMQ_URL: {}", e)))?;

    if url.scheme() != "amqp" && url.scheme() != "amqps" {
        return Err(ConfigError::InvalidUrl(format!(
            "RABBITMQ_URL must use the amqp or amqps scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.queue_name.is_empty() {
        return Err(ConfigError::Validation(
            "queue_name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates worker configuration
fn validate_worker_config(config: &WorkerConfig) -> Result<(), ConfigError> {
    if config.receive_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "TIMEOUT must be at least 1 second".to_string(),
        ));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "progress_interval must be >= 1, got {}",
            config.progress_interval
        )));
    }

    Ok(())
}
