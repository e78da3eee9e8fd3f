use super::dates::ExpiryValue;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days before expiry when renewal becomes available.
pub const RENEWAL_WINDOW_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    Lifetime,
    Active,
    RenewalOpen,
    Expired,
    Unknown,
}

impl CredentialStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::RenewalOpen,
            Self::Expired,
            Self::Active,
            Self::Lifetime,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lifetime => "Lifetime",
            Self::Active => "Active",
            Self::RenewalOpen => "Renewal Open",
            Self::Expired => "Expired",
            Self::Unknown => "Unknown",
        }
    }

    /// Accepts snake_case keys as well as display labels, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "lifetime" => Some(Self::Lifetime),
            "active" => Some(Self::Active),
            "renewal_open" | "renewal" => Some(Self::RenewalOpen),
            "expired" => Some(Self::Expired),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: CredentialStatus,
    pub renewal_open_date: Option<NaiveDate>,
}

pub fn renewal_open_date(expiry: NaiveDate) -> NaiveDate {
    expiry - Duration::days(RENEWAL_WINDOW_DAYS)
}

/// Maps an expiry value to its lifecycle state as of `today`.
///
/// Both boundaries are inclusive: the expiry day itself is already expired
/// and the first day of the renewal window already reports renewal open.
pub fn classify(expiry: &ExpiryValue, today: NaiveDate) -> Classification {
    match expiry {
        ExpiryValue::Absent => Classification {
            status: CredentialStatus::Lifetime,
            renewal_open_date: None,
        },
        ExpiryValue::Unparseable(_) => Classification {
            status: CredentialStatus::Unknown,
            renewal_open_date: None,
        },
        ExpiryValue::Date(expiry) => {
            let renewal_open = renewal_open_date(*expiry);
            let status = if today >= *expiry {
                CredentialStatus::Expired
            } else if today >= renewal_open {
                CredentialStatus::RenewalOpen
            } else {
                CredentialStatus::Active
            };

            Classification {
                status,
                renewal_open_date: Some(renewal_open),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::credentials::dates::parse_date_prefix;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn absent_expiry_is_lifetime() {
        let result = classify(&ExpiryValue::Absent, date(2024, 1, 1));
        assert_eq!(result.status, CredentialStatus::Lifetime);
        assert!(result.renewal_open_date.is_none());
    }

    #[test]
    fn unparseable_expiry_is_unknown() {
        let expiry = ExpiryValue::from(Some(parse_date_prefix("bad-date")));
        let result = classify(&expiry, date(2024, 1, 1));
        assert_eq!(result.status, CredentialStatus::Unknown);
        assert!(result.renewal_open_date.is_none());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let expiry_date = date(2025, 1, 10);
        let expiry = ExpiryValue::Date(expiry_date);

        let on_expiry = classify(&expiry, expiry_date);
        assert_eq!(on_expiry.status, CredentialStatus::Expired);

        let window_opens = expiry_date - Duration::days(180);
        assert_eq!(window_opens, date(2024, 7, 14));
        let at_window = classify(&expiry, window_opens);
        assert_eq!(at_window.status, CredentialStatus::RenewalOpen);
        assert_eq!(at_window.renewal_open_date, Some(window_opens));

        let day_before_window = classify(&expiry, expiry_date - Duration::days(181));
        assert_eq!(day_before_window.status, CredentialStatus::Active);

        let day_before_expiry = classify(&expiry, expiry_date - Duration::days(1));
        assert_eq!(day_before_expiry.status, CredentialStatus::RenewalOpen);

        let long_after = classify(&expiry, date(2026, 6, 1));
        assert_eq!(long_after.status, CredentialStatus::Expired);
    }

    #[test]
    fn renewal_window_spans_leap_day_without_adjustment() {
        assert_eq!(renewal_open_date(date(2024, 8, 27)), date(2024, 2, 29));
    }

    #[test]
    fn parse_accepts_labels_and_keys() {
        assert_eq!(
            CredentialStatus::parse("Renewal Open"),
            Some(CredentialStatus::RenewalOpen)
        );
        assert_eq!(
            CredentialStatus::parse("renewal_open"),
            Some(CredentialStatus::RenewalOpen)
        );
        assert_eq!(
            CredentialStatus::parse("EXPIRED"),
            Some(CredentialStatus::Expired)
        );
        assert_eq!(CredentialStatus::parse("retired"), None);
    }
}
