use std::time::Duration;

use async_trait::async_trait;

use crate::error::SaveError;
use crate::submission::record::SubmissionRecord;

use super::{Sink, SinkOutcome};

pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url,
        })
    }
}

#[async_trait]
impl Sink for WebhookSink {
    fn id(&self) -> &str {
        "webhook"
    }

    async fn persist(&self, record: &SubmissionRecord) -> Result<SinkOutcome, SaveError> {
        let resp = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(record)
            .send()
            .await
            .map_err(|e| SaveError::ForwardingFailed(describe(&e)))?;

        // The webhook's own status is opaque to us: any response counts as delivered.
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Webhook answered with status {status}; treating as delivered");
        }

        let response = resp
            .text()
            .await
            .map_err(|e| SaveError::ForwardingFailed(describe(&e)))?;

        Ok(SinkOutcome::Forwarded { response })
    }
}

/// Flatten the error and its sources; reqwest's top-level message omits the cause.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
