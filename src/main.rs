use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use ragdeck::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use ragdeck::http::HttpTransport;
use ragdeck::terminal::TerminalView;
use ragdeck::{ActionOutcome, AdminAction, AdminPanel, AdminReport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Admin client for the document embedding backend", long_about = None)]
struct Args {
    /// Backend origin
    #[arg(long, env = "RAGDECK_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, env = "RAGDECK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show backend readiness and storage totals
    Status,
    /// List stored files
    Files,
    /// Show how many documents are embedded
    Coverage,
    /// Show vector store size and layout
    VectorInfo,
    /// Show server load and backend readiness
    SystemStatus,
    /// Show chunking and model settings
    Settings,
    /// Delete one file
    Delete { filename: String },
    /// Delete several files in one request
    DeleteMany {
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// Delete every stored file
    DeleteAll,
    /// Rebuild the whole embedding index
    Rebuild,
    /// Embed files that have no embedding yet
    UpdateEmbeddings,
    /// Embed only the named files
    Embed {
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// Remove the embedding of one file
    DeleteEmbedding { filename: String },
    /// Drop every embedding
    ClearIndex,
    /// Back up the vector store
    Backup,
    /// Restore the vector store from a backup file
    Restore { backup_filename: String },
}

enum Task {
    Status,
    Files,
    Report(AdminReport),
    Action(AdminAction),
}

impl From<Command> for Task {
    fn from(command: Command) -> Self {
        match command {
            Command::Status => Task::Status,
            Command::Files => Task::Files,
            Command::Coverage => Task::Report(AdminReport::Coverage),
            Command::VectorInfo => Task::Report(AdminReport::VectorDb),
            Command::SystemStatus => Task::Report(AdminReport::ServerStatus),
            Command::Settings => Task::Report(AdminReport::Settings),
            Command::Delete { filename } => Task::Action(AdminAction::DeleteFile(filename)),
            Command::DeleteMany { filenames } => Task::Action(AdminAction::DeleteFiles(filenames)),
            Command::DeleteAll => Task::Action(AdminAction::DeleteAll),
            Command::Rebuild => Task::Action(AdminAction::Rebuild),
            Command::UpdateEmbeddings => Task::Action(AdminAction::UpdateEmbeddings),
            Command::Embed { filenames } => Task::Action(AdminAction::EmbedSelected(filenames)),
            Command::DeleteEmbedding { filename } => {
                Task::Action(AdminAction::DeleteEmbedding(filename))
            }
            Command::ClearIndex => Task::Action(AdminAction::ClearIndex),
            Command::Backup => Task::Action(AdminAction::BackupVectors),
            Command::Restore { backup_filename } => {
                Task::Action(AdminAction::RestoreVectors(backup_filename))
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = ClientConfig::new(&args.url, args.timeout, args.yes)?;
    debug!("backend: {}", config.base_url);

    let transport = HttpTransport::new(config.clone()).context("failed to set up HTTP client")?;
    let panel = AdminPanel::new(transport, TerminalView::stdio(config.assume_yes));

    let succeeded = match Task::from(args.command) {
        Task::Status => panel.load_status().await.is_ok(),
        Task::Files => panel.load_files().await.is_ok(),
        Task::Report(report) => panel.load_report(report).await.is_ok(),
        Task::Action(action) => match panel.run_action(&action).await {
            Ok(ActionOutcome::Completed(_)) | Ok(ActionOutcome::Cancelled) => true,
            Err(_) => false,
        },
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
