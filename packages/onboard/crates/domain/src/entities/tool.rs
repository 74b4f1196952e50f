use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// One tool the developer asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequest {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: Option<String>,
    /// Lower installs earlier
    pub priority: i32,
}

impl ToolRequest {
    pub fn new(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            priority,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Parse `name[@version]`, e.g. `python@3.12`
    pub fn from_spec(spec: &str, priority: i32) -> Self {
        match spec.split_once('@') {
            Some((name, version)) if !version.trim().is_empty() => {
                Self::new(name.trim(), priority).with_version(version.trim())
            }
            Some((name, _)) => Self::new(name.trim(), priority),
            None => Self::new(spec.trim(), priority),
        }
    }
}

impl fmt::Display for ToolRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} ({})", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Language models like to answer `"version": 3.11` instead of `"3.11"`.
/// The number's literal text is kept, so `3.10` stays `3.10`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// A free-text setup request as typed by the developer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupRequest {
    pub id: RequestId,
    pub description: String,
    pub project_path: Option<PathBuf>,
    pub timestamp: DateTime<Utc>,
}

impl SetupRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            description: description.into(),
            project_path: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }
}
