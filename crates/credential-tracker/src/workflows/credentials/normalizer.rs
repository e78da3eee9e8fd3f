use super::dates::{parse_date_value, ExpiryValue};
use super::domain::{Credential, SourceKind, UNKNOWN_ACHIEVEMENT};
use super::resolver::{
    resolve, resolve_nested, resolve_top_level, EXPIRY_KEY, EXPIRY_PARENT_KEY, ISSUE_DATE_RULE,
    NAME_RULE,
};
use super::status::classify;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

/// Turns one raw transcript record into a [`Credential`]. Never fails.
pub fn normalize_record(record: &Value, kind: SourceKind, today: NaiveDate) -> Credential {
    let name = resolve_name(record);
    let issue_date = resolve_issue_date(record, &name);
    let expiry = if kind.carries_expiry() {
        resolve_expiry(record)
    } else {
        ExpiryValue::Absent
    };

    if let ExpiryValue::Unparseable(err) = &expiry {
        debug!(credential = %name, error = %err, "expiry date could not be parsed");
    }

    let classification = classify(&expiry, today);

    Credential {
        name,
        source_kind: kind,
        issue_date,
        expiry_date: expiry.date(),
        renewal_open_date: classification.renewal_open_date,
        status: classification.status,
    }
}

fn resolve_name(record: &Value) -> String {
    let name = resolve(record, &NAME_RULE)
        .and_then(|field| {
            if field.depth > 0 {
                debug!(
                    field = NAME_RULE.field,
                    key = field.key,
                    depth = field.depth,
                    "name found below top level"
                );
            }
            field.as_text()
        })
        .filter(|name| !name.is_empty());
    name.unwrap_or_else(|| UNKNOWN_ACHIEVEMENT.to_string())
}

fn resolve_issue_date(record: &Value, name: &str) -> Option<NaiveDate> {
    let field = resolve(record, &ISSUE_DATE_RULE)?;
    if field.depth > 0 {
        debug!(
            credential = %name,
            field = ISSUE_DATE_RULE.field,
            key = field.key,
            depth = field.depth,
            "issue date found below top level"
        );
    }
    match parse_date_value(field.value) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(
                credential = %name,
                field = ISSUE_DATE_RULE.field,
                key = field.key,
                error = %err,
                "unparseable date ignored"
            );
            None
        }
    }
}

/// Top-level `expirationDate`, else `certificationStatus.expirationDate`.
fn resolve_expiry(record: &Value) -> ExpiryValue {
    const EXPIRY_KEYS: &[&str] = &[EXPIRY_KEY];

    let field = resolve_top_level(record, EXPIRY_KEYS)
        .or_else(|| resolve_nested(record, EXPIRY_PARENT_KEY, EXPIRY_KEY));
    ExpiryValue::from(field.map(|field| parse_date_value(field.value)))
}
