use chrono::NaiveDate;
use serde_json::Value;

const DATE_PREFIX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("date value '{value}' is shorter than YYYY-MM-DD")]
    TooShort { value: String },
    #[error("date value '{value}' does not match YYYY-MM-DD")]
    Malformed { value: String },
    #[error("date value is not text: {value}")]
    NotText { value: String },
}

/// Expiry as found on a raw record, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryValue {
    Absent,
    Unparseable(DateParseError),
    Date(NaiveDate),
}

impl ExpiryValue {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ExpiryValue::Date(date) => Some(*date),
            ExpiryValue::Absent | ExpiryValue::Unparseable(_) => None,
        }
    }
}

impl From<Option<Result<NaiveDate, DateParseError>>> for ExpiryValue {
    fn from(value: Option<Result<NaiveDate, DateParseError>>) -> Self {
        match value {
            None => ExpiryValue::Absent,
            Some(Ok(date)) => ExpiryValue::Date(date),
            Some(Err(err)) => ExpiryValue::Unparseable(err),
        }
    }
}

/// Parses the leading `YYYY-MM-DD` of `raw`, ignoring any time or zone suffix.
pub fn parse_date_prefix(raw: &str) -> Result<NaiveDate, DateParseError> {
    let prefix = match raw.char_indices().nth(DATE_PREFIX_LEN) {
        Some((end, _)) => &raw[..end],
        None if raw.chars().count() == DATE_PREFIX_LEN => raw,
        None => {
            return Err(DateParseError::TooShort {
                value: raw.to_string(),
            })
        }
    };

    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| DateParseError::Malformed {
        value: raw.to_string(),
    })
}

/// Same as [`parse_date_prefix`] for a JSON value, which must be a string.
pub fn parse_date_value(value: &Value) -> Result<NaiveDate, DateParseError> {
    match value {
        Value::String(raw) => parse_date_prefix(raw),
        other => Err(DateParseError::NotText {
            value: other.to_string(),
        }),
    }
}
