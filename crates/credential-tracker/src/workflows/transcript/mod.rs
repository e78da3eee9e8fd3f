mod summary;

pub use summary::{recent_training, RecentTraining, TranscriptSummary};

use crate::workflows::credentials::{
    collect_credentials, Credential, CredentialFilter, CredentialOrder, CredentialView,
    StatusTally,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptImportError {
    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
    #[error("transcript is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not load transcript data")]
    MissingDocument,
}

/// Options applied when turning a transcript into a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub today: NaiveDate,
    pub order: CredentialOrder,
    pub filter: CredentialFilter,
    pub recent_limit: usize,
}

impl ReportOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            order: CredentialOrder::default(),
            filter: CredentialFilter::default(),
            recent_limit: 5,
        }
    }
}

/// Everything extracted from one transcript document.
#[derive(Debug, Clone)]
pub struct TranscriptReport {
    pub today: NaiveDate,
    pub summary: TranscriptSummary,
    pub credentials: Vec<Credential>,
    pub recent_training: Vec<RecentTraining>,
}

impl TranscriptReport {
    pub fn tally(&self) -> StatusTally {
        StatusTally::from_credentials(&self.credentials)
    }

    pub fn credential_views(&self) -> Vec<CredentialView> {
        self.credentials
            .iter()
            .map(|credential| credential.to_view(self.today))
            .collect()
    }

    pub fn to_view(&self) -> TranscriptReportView {
        TranscriptReportView {
            today: self.today,
            summary: self.summary.clone(),
            tally: self.tally(),
            credentials: self.credential_views(),
            recent_training: self.recent_training.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptReportView {
    pub today: NaiveDate,
    pub summary: TranscriptSummary,
    pub tally: StatusTally,
    pub credentials: Vec<CredentialView>,
    pub recent_training: Vec<RecentTraining>,
}

pub struct TranscriptImporter;

impl TranscriptImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &ReportOptions,
    ) -> Result<TranscriptReport, TranscriptImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, options)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        options: &ReportOptions,
    ) -> Result<TranscriptReport, TranscriptImportError> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::from_value(&document, options)
    }

    /// A `null` document means nothing was fetched; it is not an empty transcript.
    pub fn from_value(
        document: &Value,
        options: &ReportOptions,
    ) -> Result<TranscriptReport, TranscriptImportError> {
        if document.is_null() {
            return Err(TranscriptImportError::MissingDocument);
        }

        let mut credentials = options
            .filter
            .apply(collect_credentials(document, options.today));
        options.order.apply(&mut credentials);

        let report = TranscriptReport {
            today: options.today,
            summary: TranscriptSummary::from_document(document),
            credentials,
            recent_training: recent_training(document, options.recent_limit),
        };

        info!(
            credentials = report.credentials.len(),
            today = %report.today,
            "transcript normalized"
        );
        Ok(report)
    }
}
