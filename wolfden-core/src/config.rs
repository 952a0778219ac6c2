use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://newapi.maltobitoo.xyz/v1";
pub const DEFAULT_API_KEY: &str = "";
pub const DEFAULT_PORT: u16 = 169;

/// Fields a client may change through the config API. `port` is deliberately absent.
pub const UPDATABLE_FIELDS: [&str; 4] = ["apiBase", "apiKey", "rolesSetup", "modelsSetup"];

/// The persisted server configuration (`config.json`).
///
/// Kept as a raw JSON object so fields the server does not know about
/// survive a load/merge/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    /// Wraps an existing JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(ConfigDocument(map)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Port to bind at startup. Falls back to [`DEFAULT_PORT`] when the stored
    /// value is missing or not a usable TCP port.
    pub fn port(&self) -> u16 {
        match self.0.get("port") {
            None => DEFAULT_PORT,
            Some(value) => match value.as_u64().and_then(|p| u16::try_from(p).ok()) {
                Some(port) if port != 0 => port,
                _ => {
                    warn!(
                        port = %value,
                        fallback = DEFAULT_PORT,
                        "Configured port is not a valid TCP port, using default"
                    );
                    DEFAULT_PORT
                }
            },
        }
    }

    /// Copies every updatable field present in `patch` into this document.
    ///
    /// Values are copied verbatim, `null` included. Anything else in `patch`
    /// is ignored; a non-object `patch` changes nothing. Returns the number of
    /// fields copied.
    pub fn merge_from(&mut self, patch: &Value) -> usize {
        let Some(incoming) = patch.as_object() else {
            return 0;
        };
        let mut copied = 0;
        for field in UPDATABLE_FIELDS {
            if let Some(value) = incoming.get(field) {
                self.0.insert(field.to_string(), value.clone());
                copied += 1;
            }
        }
        copied
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert("apiBase".to_string(), Value::from(DEFAULT_API_BASE));
        map.insert("apiKey".to_string(), Value::from(DEFAULT_API_KEY));
        map.insert("port".to_string(), Value::from(DEFAULT_PORT));
        ConfigDocument(map)
    }
}
