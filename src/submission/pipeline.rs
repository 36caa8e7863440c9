use axum::http::HeaderMap;
use chrono::Utc;

use crate::error::SaveError;
use crate::sinks::SinkOutcome;
use crate::state::SharedState;

use super::metadata;
use super::parser;
use super::record::SubmissionRecord;

/// Parse, normalize and hand one submission to the configured sink.
/// An invalid body never reaches the sink.
pub async fn run(
    state: &SharedState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<SinkOutcome, SaveError> {
    let payload = parser::parse_body(body)?;
    let record = SubmissionRecord::new(payload, metadata::user_agent(headers), Utc::now());

    let outcome = state.sink.persist(&record).await?;

    tracing::info!(
        sink = state.sink.id(),
        imeis = record.imeis.len(),
        "Submission saved"
    );

    Ok(outcome)
}
