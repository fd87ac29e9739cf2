//! Configuration validation.

use std::net::SocketAddr;

use couture_core::StoreLocation;

use crate::Config;
use crate::loader::ConfigError;

const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];
const LOG_OUTPUTS: [&str; 2] = ["stdout", "stderr"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Validation("server.listen is empty".into()));
    }
    if config.server.listen.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "server.listen is not a socket address: {}",
            config.server.listen
        )));
    }
    if config.server.request_body_limit_bytes == 0 {
        return Err(ConfigError::Validation(
            "server.request_body_limit_bytes must be > 0".into(),
        ));
    }
    if config.store.http_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "store.http_timeout_secs must be > 0".into(),
        ));
    }
    if let Err(e) = config.store.location.parse::<StoreLocation>() {
        return Err(ConfigError::Validation(format!("store.location: {e}")));
    }
    if let Some(format) = config.logging.format.as_deref()
        && !LOG_FORMATS.contains(&format)
    {
        return Err(ConfigError::Validation(format!(
            "logging.format must be one of: {:?}",
            LOG_FORMATS
        )));
    }
    if let Some(output) = config.logging.output.as_deref()
        && !LOG_OUTPUTS.contains(&output)
    {
        return Err(ConfigError::Validation(format!(
            "logging.output must be one of: {:?}",
            LOG_OUTPUTS
        )));
    }
    Ok(())
}
