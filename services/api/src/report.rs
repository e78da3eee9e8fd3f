use crate::infra::{parse_date, parse_status};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use credential_tracker::config::AppConfig;
use credential_tracker::error::AppError;
use credential_tracker::telemetry::{self, LogSink};
use credential_tracker::workflows::credentials::{
    CredentialFilter, CredentialOrder, CredentialStatus,
};
use credential_tracker::workflows::transcript::{
    ReportOptions, TranscriptImporter, TranscriptReport,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OrderArg {
    /// Transcript order: certifications, then exams, then applied skills
    #[default]
    Merge,
    /// Soonest expiry first, lifetime and unparseable entries last
    Urgency,
}

impl From<OrderArg> for CredentialOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Merge => CredentialOrder::Merge,
            OrderArg::Urgency => CredentialOrder::Urgency,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CredentialReportArgs {
    /// Transcript JSON file, or '-' for stdin (defaults to TRANSCRIPT_PATH)
    #[arg(long)]
    pub(crate) transcript: Option<PathBuf>,
    /// Evaluation date for renewal status (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Ordering of the credential list
    #[arg(long, value_enum, default_value_t = OrderArg::Merge)]
    pub(crate) order: OrderArg,
    /// Case-insensitive substring filter on credential names
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Only show credentials with this status (repeatable)
    #[arg(long = "status", value_parser = parse_status)]
    pub(crate) statuses: Vec<CredentialStatus>,
    /// Emit JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_credentials_report(args: CredentialReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;

    let CredentialReportArgs {
        transcript,
        today,
        order,
        search,
        statuses,
        json,
    } = args;

    let source = transcript
        .or(config.transcript.source_path)
        .ok_or(AppError::NoTranscriptSource)?;

    let options = ReportOptions {
        today: today.unwrap_or_else(|| Local::now().date_naive()),
        order: order.into(),
        filter: CredentialFilter {
            query: search,
            statuses,
        },
        recent_limit: config.transcript.recent_limit,
    };

    let report = if source.as_os_str() == "-" {
        TranscriptImporter::from_reader(io::stdin().lock(), &options)?
    } else {
        TranscriptImporter::from_path(&source, &options)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report.to_view())?;
        writeln!(out)?;
    } else {
        render_report(&mut out, &report)?;
    }

    Ok(())
}

pub(crate) fn render_report<W: Write>(out: &mut W, report: &TranscriptReport) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "Credential renewal report (evaluated {})", report.today)?;
    writeln!(
        out,
        "Modules completed: {} | Learning paths: {} | Study hours: {:.1}",
        summary.modules_completed, summary.learning_paths_completed, summary.study_hours
    )?;

    if report.credentials.is_empty() {
        writeln!(
            out,
            "\nNo credentials found. Check the transcript sharing settings."
        )?;
    } else {
        let tally = report.tally();
        writeln!(out, "\nStatus overview")?;
        for status in CredentialStatus::ordered() {
            let count = tally.count(status);
            if count > 0 {
                writeln!(out, "- {}: {}", status.label(), count)?;
            }
        }
        writeln!(out, "Needs action: {}", tally.needs_action())?;

        writeln!(out, "\nCredentials")?;
        for view in report.credential_views() {
            let countdown = match view.days_until_expiry {
                Some(days) if days >= 0 => format!(" ({days} days left)"),
                Some(days) => format!(" ({} days ago)", -days),
                None => String::new(),
            };
            writeln!(
                out,
                "- [{}] {} | {} | issued {} | expires {}{} | renewal opens {}",
                view.status_label,
                view.name,
                view.source_label,
                view.issue_label,
                view.expiry_label,
                countdown,
                view.renewal_label
            )?;
        }
    }

    if !report.recent_training.is_empty() {
        writeln!(out, "\nRecent training")?;
        for module in &report.recent_training {
            match module.completed_on {
                Some(date) => writeln!(out, "- {} (completed {date})", module.title)?,
                None => writeln!(out, "- {}", module.title)?,
            }
        }
    }

    Ok(())
}
