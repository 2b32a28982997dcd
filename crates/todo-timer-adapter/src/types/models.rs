/*
[INPUT]:  Remote todo payload and serde requirements
[OUTPUT]: Raw todo records tolerant of loosely-typed sample data
[POS]:    Data layer - type definitions for remote communication
[UPDATE]: When the payload schema changes or new types added
[UPDATE]: 2026-10-03 Accept `text` as an alternate title field
*/

use serde::{Deserialize, Serialize};

/// Todo record as served by the sample-data endpoint.
///
/// `id` may arrive as a string or a number, the title may be under `title` or
/// `text`, and `completed` may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTodo {
    #[serde(default, deserialize_with = "serde_helpers::deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_truthy")]
    pub completed: bool,
}

impl RawTodo {
    /// Title with the `text` fallback applied.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or_default()
    }
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(String::new()),
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            _ => Err(serde::de::Error::custom("invalid todo id")),
        }
    }

    pub fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => false,
            Value::Bool(flag) => flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(raw) => !raw.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }
}
