use crate::report::{run_credentials_report, CredentialReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credential_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credential Tracker",
    about = "Track certification renewal windows from a shared learning transcript",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect credentials from a transcript export
    Credentials {
        #[command(subcommand)]
        command: CredentialsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CredentialsCommand {
    /// Print credentials with renewal status, summary totals and recent training
    Report(CredentialReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Credentials {
            command: CredentialsCommand::Report(args),
        } => run_credentials_report(args),
    }
}
