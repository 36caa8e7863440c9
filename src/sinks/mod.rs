pub mod csv_file;
pub mod webhook;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::SaveError;
use crate::submission::record::SubmissionRecord;

use csv_file::CsvFileSink;
use webhook::WebhookSink;

/// What a sink reports after accepting a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOutcome {
    /// Raw body returned by the webhook, whatever its status code.
    Forwarded { response: String },
    /// Name of the file the row was appended to.
    Saved { saved_to: String },
}

/// Destination for submission records. Exactly one is active per process.
#[async_trait]
pub trait Sink: Send + Sync {
    fn id(&self) -> &str;
    async fn persist(&self, record: &SubmissionRecord) -> Result<SinkOutcome, SaveError>;
}

/// Pick the sink once from configuration: webhook if a URL is set, else the local file.
pub fn from_config(config: &Config) -> Result<Arc<dyn Sink>, reqwest::Error> {
    if config.forwarding_enabled() {
        Ok(Arc::new(WebhookSink::new(
            config.webhook_url.clone(),
            config.forward_timeout,
        )?))
    } else {
        Ok(Arc::new(CsvFileSink::new(config.data_path.clone())))
    }
}
