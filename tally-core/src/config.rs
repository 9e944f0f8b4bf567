//! Configuration for the coordinator and its dispatch behavior.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agent_registry::Agent;
use crate::error::{CoreResult, Error};

/// Coordinator configuration: dispatch behavior plus the agents known at
/// startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CoordinatorConfig {
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Agents registered before the server starts accepting requests,
    /// in addition to whatever registers over HTTP later
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// Settings for the asynchronous task send.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispatchConfig {
    /// Upper bound on one agent call, connection through response
    #[serde(default = "default_request_timeout", with = "duration_ms")]
    #[schema(value_type = u64, pattern = "uint64 as milliseconds")]
    pub request_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl CoordinatorConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        from_file(path)
    }
}

/// Loads any deserializable configuration type from a JSON file.
pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> CoreResult<T> {
    let file =
        File::open(path).map_err(|e| Error::Internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

/// Serde adapter storing a `Duration` as integer milliseconds.
pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.dispatch.request_timeout, Duration::from_secs(30));
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "dispatch": { "request_timeout": 5000 },
            "agents": [
                { "id": "agent-1", "address": "http://127.0.0.1:8081" },
                { "id": "agent-2", "address": "http://127.0.0.1:8082" }
            ]
        }"#;
        let config: CoordinatorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.dispatch.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[0].id, "agent-1");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: CoordinatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.dispatch.request_timeout, Duration::from_secs(30));
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_duration_serializes_as_milliseconds() {
        let config = DispatchConfig {
            request_timeout: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["request_timeout"], 1500);
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = CoordinatorConfig::from_file("/definitely/not/a/real/path.json");
        assert!(result.is_err());
    }
}
