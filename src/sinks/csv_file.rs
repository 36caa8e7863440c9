use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SaveError;
use crate::submission::record::{CSV_HEADER, SubmissionRecord};

use super::{Sink, SinkOutcome};

/// Append-only CSV log used when no webhook is configured.
/// The file is opened and closed per record; there is no cross-process locking.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn saved_to(&self) -> String {
        display_name(&self.path)
    }
}

#[async_trait]
impl Sink for CsvFileSink {
    fn id(&self) -> &str {
        "csv"
    }

    async fn persist(&self, record: &SubmissionRecord) -> Result<SinkOutcome, SaveError> {
        let path = self.path.clone();
        let row = record.csv_row();

        tokio::task::spawn_blocking(move || append_row(&path, &row))
            .await
            .map_err(|e| SaveError::LocalPersistFailed(e.to_string()))?
            .map_err(|e| SaveError::LocalPersistFailed(e.to_string()))?;

        Ok(SinkOutcome::Saved {
            saved_to: self.saved_to(),
        })
    }
}

/// File-name part of `path`, the only part reported to clients.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Append one row, writing the header first if the file did not exist yet.
pub fn append_row(path: &Path, row: &[String]) -> Result<(), csv::Error> {
    let new_file = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);
    if new_file {
        writer.write_record(CSV_HEADER)?;
    }
    writer.write_record(row)?;
    writer.flush()?;

    Ok(())
}
