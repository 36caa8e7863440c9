use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Columns of the local fallback file, in row order.
pub const CSV_HEADER: [&str; 6] = ["timestamp", "role", "name", "imeis", "raw_text", "user_agent"];

/// Inbound body of `POST /save`. Every key is optional and values are taken as sent;
/// only absence (or null) is interpreted.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub role: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub imeis: Value,
    #[serde(default)]
    pub raw_text: Value,
}

/// Canonical, timestamped submission. Also the JSON body sent to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub role: Value,
    pub name: Value,
    pub imeis: Vec<Value>,
    pub raw_text: Value,
    pub user_agent: String,
}

impl SubmissionRecord {
    pub fn new(payload: SubmissionPayload, user_agent: String, received_at: DateTime<Utc>) -> Self {
        let raw_text = match payload.raw_text {
            Value::Null => Value::String(String::new()),
            other => other,
        };

        Self {
            timestamp: format_timestamp(received_at),
            role: payload.role,
            name: payload.name,
            imeis: normalize_imeis(payload.imeis),
            raw_text,
            user_agent,
        }
    }

    /// One CSV row; IMEIs collapse into a single newline-separated cell.
    pub fn csv_row(&self) -> [String; 6] {
        [
            self.timestamp.clone(),
            cell(&self.role),
            cell(&self.name),
            self.imeis.iter().map(cell).collect::<Vec<_>>().join("\n"),
            cell(&self.raw_text),
            self.user_agent.clone(),
        ]
    }
}

/// Absent or null means no IMEIs; a lone value is a list of one.
fn normalize_imeis(imeis: Value) -> Vec<Value> {
    match imeis {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        single => vec![single],
    }
}

/// Strings as-is, null as empty, anything else as its JSON text.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `2026-10-19T08:15:02Z`: UTC, whole seconds.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
