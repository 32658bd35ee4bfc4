use donor_query::parse_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder text for a context field that is missing or blank.
pub const UNKNOWN: &str = "Unknown";

/// Free-form payload that travels with a trigger: counts, names, amounts.
///
/// Every accessor tolerates missing or malformed entries: numbers fall back
/// to `0`, text falls back to `None` (rendered as [`UNKNOWN`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerContext(Map<String, Value>);

impl TriggerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn with_count(self, count: u64) -> Self {
        self.with("count", count)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Numeric field, accepting numbers and numeric strings. Anything else is `0`.
    pub fn number(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => parse_number(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Text field. Numbers and booleans are stringified; blanks read as `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for TriggerContext {
    fn from(map: Map<String, Value>) -> Self {
        TriggerContext(map)
    }
}
