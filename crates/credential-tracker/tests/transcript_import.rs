use chrono::{Duration, NaiveDate};
use credential_tracker::workflows::credentials::{
    collect_credentials, CredentialOrder, CredentialStatus, SourceKind,
};
use credential_tracker::workflows::transcript::{ReportOptions, TranscriptImporter};
use serde_json::{json, Value};

const FIXTURE: &str = include_str!("fixtures/transcript.json");

fn fixture() -> Value {
    serde_json::from_str(FIXTURE).expect("fixture is valid json")
}

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 14).expect("valid evaluation date")
}

fn find<'a>(
    credentials: &'a [credential_tracker::workflows::credentials::Credential],
    name: &str,
) -> &'a credential_tracker::workflows::credentials::Credential {
    credentials
        .iter()
        .find(|credential| credential.name == name)
        .unwrap_or_else(|| panic!("credential {name} present"))
}

#[test]
fn fixture_transcript_classifies_every_bucket() {
    let report = TranscriptImporter::from_reader(
        FIXTURE.as_bytes(),
        &ReportOptions::new(evaluation_date()),
    )
    .expect("transcript imports");

    assert_eq!(report.credentials.len(), 7);

    let admin = find(
        &report.credentials,
        "Microsoft Certified: Azure Administrator Associate",
    );
    assert_eq!(admin.status, CredentialStatus::RenewalOpen);
    assert_eq!(
        admin.renewal_open_date,
        Some(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap() - Duration::days(180))
    );

    let secops = find(
        &report.credentials,
        "Microsoft Certified: Security Operations Analyst Associate",
    );
    assert_eq!(secops.status, CredentialStatus::Expired);
    assert_eq!(secops.expiry_date, NaiveDate::from_ymd_opt(2023, 5, 1));

    let fundamentals = find(&report.credentials, "Microsoft Certified: Azure Fundamentals");
    assert_eq!(fundamentals.status, CredentialStatus::Lifetime);
    assert_eq!(fundamentals.source_kind, SourceKind::Certification);
    assert_eq!(fundamentals.issue_date, NaiveDate::from_ymd_opt(2021, 3, 11));

    let endpoint = find(
        &report.credentials,
        "Microsoft Certified: Endpoint Administrator Associate",
    );
    assert_eq!(endpoint.status, CredentialStatus::Unknown);
    assert!(endpoint.renewal_open_date.is_none());

    let skill = find(
        &report.credentials,
        "Secure storage for Azure Files and Azure Blob Storage",
    );
    assert_eq!(skill.source_kind, SourceKind::AppliedSkill);
    assert_eq!(skill.status, CredentialStatus::Lifetime);

    let tally = report.tally();
    assert_eq!(tally.lifetime, 3);
    assert_eq!(tally.active, 1);
    assert_eq!(tally.renewal_open, 1);
    assert_eq!(tally.expired, 1);
    assert_eq!(tally.unknown, 1);

    assert_eq!(report.summary.modules_completed, 128);
    assert!((report.summary.study_hours - 90.5).abs() < f64::EPSILON);
    assert_eq!(report.recent_training.len(), 5);
    assert_eq!(report.recent_training[0].title, "Describe cloud computing");
}

#[test]
fn urgency_order_puts_lifetime_then_unknown_last() {
    let mut options = ReportOptions::new(evaluation_date());
    options.order = CredentialOrder::Urgency;
    let report = TranscriptImporter::from_value(&fixture(), &options).expect("report builds");

    let statuses: Vec<CredentialStatus> = report.credentials.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![
            CredentialStatus::Expired,
            CredentialStatus::RenewalOpen,
            CredentialStatus::Active,
            CredentialStatus::Lifetime,
            CredentialStatus::Lifetime,
            CredentialStatus::Lifetime,
            CredentialStatus::Unknown,
        ]
    );
}

#[test]
fn renewal_boundaries_hold_for_every_offset() {
    let expiry = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid expiry");
    let document = json!({
        "certificationData": { "activeCertifications": [
            { "certificationName": "Boundary", "expirationDate": "2025-01-10" }
        ] }
    });

    let status_on = |today: NaiveDate| collect_credentials(&document, today)[0].status;

    assert_eq!(status_on(expiry), CredentialStatus::Expired);
    assert_eq!(
        status_on(expiry - Duration::days(180)),
        CredentialStatus::RenewalOpen
    );
    assert_eq!(
        status_on(expiry - Duration::days(181)),
        CredentialStatus::Active
    );
}

#[test]
fn duplicates_across_buckets_keep_the_first_record() {
    let document = json!({
        "certificationData": { "activeCertifications": [
            { "title": "AZ-900", "issueDate": "2021-03-11", "expirationDate": "2030-01-01" }
        ] },
        "examData": { "passedExams": [
            { "examName": "AZ-900", "passDate": "2021-03-10" }
        ] }
    });
    let credentials = collect_credentials(&document, evaluation_date());
    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0].source_kind, SourceKind::Certification);
    assert_eq!(credentials[0].issue_date, NaiveDate::from_ymd_opt(2021, 3, 11));
    assert_eq!(credentials[0].status, CredentialStatus::Active);
}

#[test]
fn normalizing_twice_is_identical() {
    let document = fixture();
    let options = ReportOptions::new(evaluation_date());
    let first = TranscriptImporter::from_value(&document, &options).expect("first run");
    let second = TranscriptImporter::from_value(&document, &options).expect("second run");
    assert_eq!(first.credentials, second.credentials);
}
