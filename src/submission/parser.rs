use crate::error::SaveError;

use super::record::SubmissionPayload;

/// Parse a save body as JSON, whatever the Content-Type says.
/// Only the shape is checked: the body must be a JSON object. Field values are not validated.
pub fn parse_body(body: &[u8]) -> Result<SubmissionPayload, SaveError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| SaveError::InvalidPayload(e.to_string()))?;

    if !value.is_object() {
        return Err(SaveError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| SaveError::InvalidPayload(e.to_string()))
}
