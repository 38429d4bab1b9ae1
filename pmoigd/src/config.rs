//! Configuration of the IGD client.
//!
//! The configuration is built in three layers:
//! 1. the default YAML document embedded in the crate,
//! 2. an optional user YAML file merged over it,
//! 3. environment variables prefixed with `PMOIGD_CONFIG__`, where `__`
//!    separates path segments (`PMOIGD_CONFIG__HTTP__TIMEOUT_SECS=5`).
//!
//! ```no_run
//! use std::path::Path;
//! use pmoigd::config::IgdConfig;
//!
//! let config = IgdConfig::load(Some(Path::new("igd.yaml")))?;
//! println!("timeout: {:?}", config.http.timeout_secs);
//! # Ok::<(), pmoigd::IgdError>(())
//! ```

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::errors::{IgdError, Result};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmoigd.yaml");

const ENV_PREFIX: &str = "PMOIGD_CONFIG__";

const DEFAULT_USER_AGENT: &str = "PMOMusic IGD Client";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgdConfig {
    pub http: HttpConfig,
}

/// Settings of the HTTP transport used for descriptions and SOAP calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global timeout for one exchange; `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl IgdConfig {
    /// Loads the embedded defaults, merges `path` over them when given, then
    /// applies `PMOIGD_CONFIG__*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, env::vars())
    }

    fn load_with_env<I>(path: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)
            .map_err(|e| IgdError::Config(format!("embedded defaults: {e}")))?;

        if let Some(path) = path {
            let data = fs::read_to_string(path).map_err(|e| {
                IgdError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            let external: Value = serde_yaml::from_str(&data)
                .map_err(|e| IgdError::Config(format!("{}: {e}", path.display())))?;
            info!(config_file=%path.display(), "Loaded IGD config file");
            merge_yaml(&mut config_value, &lower_keys_value(external));
        }

        apply_env_overrides(&mut config_value, vars);

        serde_yaml::from_value(config_value).map_err(|e| IgdError::Config(e.to_string()))
    }

    /// Parses a YAML document merged over the embedded defaults. No
    /// environment override is applied.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)
            .map_err(|e| IgdError::Config(format!("embedded defaults: {e}")))?;
        let external: Value =
            serde_yaml::from_str(yaml).map_err(|e| IgdError::Config(e.to_string()))?;
        merge_yaml(&mut config_value, &lower_keys_value(external));
        serde_yaml::from_value(config_value).map_err(|e| IgdError::Config(e.to_string()))
    }
}

fn apply_env_overrides<I>(config: &mut Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(suffix) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key_path = suffix.split("__").collect::<Vec<_>>();
        debug!("Config override from {}", key);
        set_value(config, &key_path, convert_env_value(&value));
    }
}

fn set_value(data: &mut Value, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *data = value;
        return;
    };
    if !data.is_mapping() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key = Value::String(head.to_lowercase());
        if rest.is_empty() {
            map.insert(key, value);
        } else {
            if !map.contains_key(&key) {
                map.insert(key.clone(), Value::Mapping(Mapping::new()));
            }
            if let Some(entry) = map.get_mut(&key) {
                set_value(entry, rest, value);
            }
        }
    }
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| match k {
                    Value::String(s) => (Value::String(s.to_lowercase()), lower_keys_value(v)),
                    other => (other, lower_keys_value(v)),
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        // scalaires ou séquences : on remplace
        (d, e) => *d = e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_embedded_defaults() {
        let config = IgdConfig::load_with_env(None, Vec::new()).unwrap();
        assert_eq!(config, IgdConfig::default());
    }

    #[test]
    fn test_yaml_merge_keeps_unset_defaults() {
        let config = IgdConfig::from_yaml_str("HTTP:\n  Timeout_Secs: 7\n").unwrap();
        assert_eq!(config.http.timeout_secs, Some(7));
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_env_overrides() {
        let config = IgdConfig::load_with_env(
            None,
            vars(&[
                ("PMOIGD_CONFIG__HTTP__TIMEOUT_SECS", "3"),
                ("PMOIGD_CONFIG__HTTP__USER_AGENT", "test-agent"),
                ("UNRELATED", "1"),
            ]),
        )
        .unwrap();
        assert_eq!(config.http.timeout_secs, Some(3));
        assert_eq!(config.http.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        match IgdConfig::from_yaml_str("http:\n  timeout_secs: soon\n") {
            Err(IgdError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
