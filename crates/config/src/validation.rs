//! Configuration validation
//!
//! Checks performed after parsing, before the config is handed to the
//! reporter:
//!
//! - at least one collector profile is configured
//! - required per-profile fields are non-empty

use crate::{Config, ConfigError, Result};

/// Validate a parsed configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.collectd.is_none() && config.graphite.is_none() {
        return Err(ConfigError::NoCollectorsEnabled);
    }

    if let Some(ref collectd) = config.collectd
        && collectd.path.as_os_str().is_empty()
    {
        return Err(ConfigError::missing_field("collectd", "path"));
    }

    if let Some(ref graphite) = config.graphite {
        if graphite.host.is_empty() {
            return Err(ConfigError::missing_field("graphite", "host"));
        }
        if graphite.api_key.is_empty() {
            return Err(ConfigError::missing_field("graphite", "api_key"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Config, ConfigError};
    use std::str::FromStr;

    #[test]
    fn test_collectd_requires_path() {
        let result = Config::from_str("[collectd]");
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "path", .. })
        ));
    }

    #[test]
    fn test_graphite_requires_host() {
        let result = Config::from_str("[graphite]\napi_key = \"key1\"");
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "host", .. })
        ));
    }

    #[test]
    fn test_graphite_requires_api_key() {
        let result = Config::from_str("[graphite]\nhost = \"carbon\"");
        assert!(matches!(
            result,
            Err(ConfigError::MissingField {
                field: "api_key",
                ..
            })
        ));
    }

    #[test]
    fn test_valid_config_passes() {
        let config = Config::from_str("[collectd]\npath = \"/run/cd.sock\"");
        assert!(config.is_ok());
    }
}
