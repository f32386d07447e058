use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the mock server binds to
    pub bind_addr: String,
    /// Fixture file mutations are written through to; in-memory when unset
    pub fixture_path: Option<PathBuf>,
    /// Seed demo users when the loaded fixture has none
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "QUORUM_BIND_ADDR", "127.0.0.1:8787");

        let fixture_path = lookup("QUORUM_FIXTURE_PATH")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let seed_demo = match value_or_default(&lookup, "QUORUM_SEED_DEMO", "true").as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                return Err(ConfigError::Invalid(
                    "QUORUM_SEED_DEMO must be true or false".to_string(),
                ))
            }
        };

        Ok(Self {
            bind_addr,
            fixture_path,
            seed_demo,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            fixture_path: None,
            seed_demo: false,
        }
    }
}

fn value_or_default(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
