use super::status::CredentialStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ACHIEVEMENT: &str = "Unknown Achievement";

/// Which transcript bucket a credential was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Certification,
    Exam,
    AppliedSkill,
    Unknown,
}

impl SourceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Certification => "Certification",
            Self::Exam => "Exam",
            Self::AppliedSkill => "Applied Skill",
            Self::Unknown => "Unknown",
        }
    }

    /// Exams and applied skills are recorded without renewal cycles.
    pub const fn carries_expiry(self) -> bool {
        matches!(self, Self::Certification | Self::Unknown)
    }
}

/// Canonical, normalized achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub name: String,
    pub source_kind: SourceKind,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub renewal_open_date: Option<NaiveDate>,
    pub status: CredentialStatus,
}

impl Credential {
    /// Whole days from `today` until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date
            .map(|expiry| expiry.signed_duration_since(today).num_days())
    }

    pub fn to_view(&self, today: NaiveDate) -> CredentialView {
        let expiry_label = match (self.expiry_date, self.status) {
            (Some(expiry), _) => expiry.to_string(),
            (None, CredentialStatus::Unknown) => "Unparseable".to_string(),
            (None, _) => "Lifetime".to_string(),
        };
        let renewal_label = self
            .renewal_open_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let issue_label = self
            .issue_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        CredentialView {
            name: self.name.clone(),
            source_kind: self.source_kind,
            source_label: self.source_kind.label(),
            issue_date: self.issue_date,
            issue_label,
            expiry_date: self.expiry_date,
            expiry_label,
            renewal_open_date: self.renewal_open_date,
            renewal_label,
            status: self.status,
            status_label: self.status.label(),
            days_until_expiry: self.days_until_expiry(today),
        }
    }
}

/// Display-ready rendering of a [`Credential`].
#[derive(Debug, Clone, Serialize)]
pub struct CredentialView {
    pub name: String,
    pub source_kind: SourceKind,
    pub source_label: &'static str,
    pub issue_date: Option<NaiveDate>,
    pub issue_label: String,
    pub expiry_date: Option<NaiveDate>,
    pub expiry_label: String,
    pub renewal_open_date: Option<NaiveDate>,
    pub renewal_label: String,
    pub status: CredentialStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
}
