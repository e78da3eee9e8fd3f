//! Normalization and renewal classification of transcript achievements.

pub mod dates;
pub mod domain;
mod normalizer;
mod pipeline;
pub mod resolver;
pub mod status;
mod tally;

pub use dates::{parse_date_prefix, DateParseError, ExpiryValue};
pub use domain::{Credential, CredentialView, SourceKind, UNKNOWN_ACHIEVEMENT};
pub use normalizer::normalize_record;
pub use pipeline::{
    collect_credentials, sort_by_urgency, CredentialFilter, CredentialOrder, SourceBucket,
};
pub use status::{classify, Classification, CredentialStatus, RENEWAL_WINDOW_DAYS};
pub use tally::StatusTally;
