use std::path::PathBuf;

use anyhow::anyhow;
use routeshift::json::location::JsonLocation;

const DEPOT_ENV_VAR: &str = "ROUTESHIFT_DEPOT";
const ERROR_LOG_ENV_VAR: &str = "ROUTESHIFT_ERROR_LOG";

/// Settings read from the environment (and `.env.local`). Command line flags
/// take precedence over these. Values are parsed by the commands using them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Depot used for synthesized vehicles, as "lat,lng".
    pub depot: Option<String>,
    /// File receiving the error report of a failed `patch`.
    pub error_log: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Config {
            depot: read(DEPOT_ENV_VAR),
            error_log: read(ERROR_LOG_ENV_VAR).map(PathBuf::from),
        }
    }

    pub fn depot(&self) -> Result<Option<JsonLocation>, anyhow::Error> {
        self.depot
            .as_deref()
            .map(|value| {
                value
                    .parse::<JsonLocation>()
                    .map_err(|err| anyhow!("{DEPOT_ENV_VAR}: {err}"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.depot().unwrap(), None);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            DEPOT_ENV_VAR => Some(String::from("50.85,4.35")),
            ERROR_LOG_ENV_VAR => Some(String::from("logs/patch.log")),
            _ => None,
        });

        assert_eq!(config.depot().unwrap(), JsonLocation::new(50.85, 4.35));
        assert_eq!(config.error_log, Some(PathBuf::from("logs/patch.log")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some(String::from("  ")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_depot_only_fails_when_read() {
        let config = Config::from_lookup(|key| match key {
            DEPOT_ENV_VAR => Some(String::from("brussels")),
            ERROR_LOG_ENV_VAR => Some(String::from("logs/patch.log")),
            _ => None,
        });

        assert_eq!(config.error_log, Some(PathBuf::from("logs/patch.log")));
        assert!(config.depot().is_err());
    }
}
