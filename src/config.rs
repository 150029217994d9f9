//! Runtime configuration.
//!
//! Defaults are compiled in; any field can be overridden from the page query
//! string, e.g. `?splash_ms=0&employer_flow=false`. Unknown keys and values of
//! the wrong type are logged and ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::Registry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Splash auto-advance delay.
    pub splash_ms: u32,
    /// Back stack depth.
    pub history_limit: usize,
    /// `localStorage` key of the screen mirror.
    pub storage_key: String,
    /// Seed the first screen from the local-storage mirror.
    pub restore_on_start: bool,
    /// Mirror the current screen into the URL hash.
    pub hash_mirror: bool,
    /// Register the employer screens.
    pub employer_flow: bool,
    /// Base URL of the account/profile/job service.
    pub api_base: String,
    /// Open the diagnostics overlay on start.
    pub show_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            splash_ms: 2_500,
            history_limit: crate::store::DEFAULT_HISTORY_LIMIT,
            storage_key: "ravyz.screen".to_string(),
            restore_on_start: true,
            hash_mirror: true,
            employer_flow: true,
            api_base: "/api".to_string(),
            show_diagnostics: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with `key=value` pairs from a query string.
    pub fn from_query(query: &str) -> Self {
        let defaults = Self::default();
        let Ok(Value::Object(mut fields)) = serde_json::to_value(&defaults) else {
            return defaults;
        };

        let pairs = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes());
        for (key, raw) in pairs {
            let Some(current) = fields.get(&*key) else {
                tracing::warn!(key = %key, "ignoring unknown config key");
                continue;
            };
            // A bare `flag` arrives with an empty value.
            let raw = if raw.is_empty() && current.is_boolean() {
                "true".into()
            } else {
                raw
            };
            let Some(value) = coerce(current, &raw) else {
                tracing::warn!(key = %key, raw = %raw, "ignoring config value of wrong type");
                continue;
            };

            // Range-check against the field type one key at a time.
            let mut candidate = fields.clone();
            candidate.insert(key.to_string(), value);
            match serde_json::from_value::<Config>(Value::Object(candidate.clone())) {
                Ok(_) => fields = candidate,
                Err(e) => {
                    tracing::warn!(key = %key, raw = %raw, error = %e, "ignoring out-of-range config value")
                }
            }
        }

        serde_json::from_value(Value::Object(fields)).unwrap_or(defaults)
    }

    /// The registry implied by the flow switches.
    pub fn registry(&self) -> Registry {
        if self.employer_flow {
            Registry::standard()
        } else {
            Registry::candidate_only()
        }
    }
}

/// Parse `raw` into the JSON type of `current`.
fn coerce(current: &Value, raw: &str) -> Option<Value> {
    match current {
        Value::Bool(_) => match raw {
            "1" | "true" | "yes" | "on" => Some(Value::Bool(true)),
            "0" | "false" | "no" | "off" => Some(Value::Bool(false)),
            _ => None,
        },
        Value::Number(_) => raw.parse::<u64>().ok().map(Value::from),
        Value::String(_) => Some(Value::String(raw.to_string())),
        _ => None,
    }
}
