use super::domain::{Credential, SourceKind};
use super::normalizer::normalize_record;
use super::status::CredentialStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// The fixed set of transcript collections credentials are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceBucket {
    Certifications,
    PassedExams,
    AppliedSkills,
}

impl SourceBucket {
    pub const fn ordered() -> [Self; 3] {
        [Self::Certifications, Self::PassedExams, Self::AppliedSkills]
    }

    /// `(section, list)` location of the bucket in the transcript.
    pub const fn path(self) -> (&'static str, &'static str) {
        match self {
            Self::Certifications => ("certificationData", "activeCertifications"),
            Self::PassedExams => ("examData", "passedExams"),
            Self::AppliedSkills => ("appliedSkillsData", "appliedSkills"),
        }
    }

    pub const fn source_kind(self) -> SourceKind {
        match self {
            Self::Certifications => SourceKind::Certification,
            Self::PassedExams => SourceKind::Exam,
            Self::AppliedSkills => SourceKind::AppliedSkill,
        }
    }

    /// Records in this bucket; a missing or non-list bucket is empty.
    pub fn records(self, document: &Value) -> &[Value] {
        let (section, list) = self.path();
        document
            .get(section)
            .and_then(|section| section.get(list))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialOrder {
    /// Bucket order, then record order within each bucket.
    #[default]
    Merge,
    /// Soonest expiry first; lifetime and unknown entries last.
    Urgency,
}

impl CredentialOrder {
    pub fn apply(self, credentials: &mut [Credential]) {
        match self {
            CredentialOrder::Merge => {}
            CredentialOrder::Urgency => sort_by_urgency(credentials),
        }
    }
}

/// Normalizes every bucket of `document` and keeps the first credential per name.
pub fn collect_credentials(document: &Value, today: NaiveDate) -> Vec<Credential> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut credentials = Vec::new();

    for bucket in SourceBucket::ordered() {
        let kind = bucket.source_kind();
        for record in bucket.records(document) {
            let credential = normalize_record(record, kind, today);
            if seen.contains(&credential.name) {
                debug!(credential = %credential.name, ?kind, "duplicate credential dropped");
                continue;
            }

            seen.insert(credential.name.clone());
            credentials.push(credential);
        }
    }

    credentials
}

/// Stable sort keeping merge order among credentials with equal urgency.
pub fn sort_by_urgency(credentials: &mut [Credential]) {
    credentials.sort_by_key(|credential| match credential.expiry_date {
        Some(expiry) => (0u8, Some(expiry)),
        None if credential.status == CredentialStatus::Unknown => (2, None),
        None => (1, None),
    });
}

/// Name search and status allow-list applied on top of the collected list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub statuses: Vec<CredentialStatus>,
}

impl CredentialFilter {
    pub fn matches(&self, credential: &Credential) -> bool {
        let query_matches = match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => credential
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        };
        let status_matches =
            self.statuses.is_empty() || self.statuses.contains(&credential.status);
        query_matches && status_matches
    }

    pub fn apply(&self, credentials: Vec<Credential>) -> Vec<Credential> {
        credentials
            .into_iter()
            .filter(|credential| self.matches(credential))
            .collect()
    }
}
