use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wizard::config::Config;
use wizard::profile::DateNormalizer;
use wizard::wizard::STEPS;
use wizard::{
    ApiClient, FileSession, ProfileList, ProfileRecord, ResumeFile, WizardController, WizardError,
};

#[derive(Parser, Debug)]
#[command(name = "wizard")]
#[command(author, version, about = "Build and manage job-application profiles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the wizard steps in order
    Steps,
    /// Parse a resume and print the profile it fills in
    Parse { file: PathBuf },
    /// Create a profile from a draft
    Create {
        draft: PathBuf,
        /// Resume to parse into the draft before submitting
        #[arg(long)]
        parse: Option<PathBuf>,
        /// Resume to attach without parsing
        #[arg(long)]
        attach: Option<PathBuf>,
    },
    /// Print a stored profile as the wizard would edit it
    Show { id: String },
    /// Replace a stored profile with a draft, keeping its resume unless the
    /// draft names one
    Update {
        id: String,
        draft: PathBuf,
        #[arg(long)]
        attach: Option<PathBuf>,
    },
    /// List your profiles
    List,
    /// Delete a profile
    Delete { id: String },
}

struct App {
    api: Arc<ApiClient>,
    session: Arc<FileSession>,
    dates: Arc<dyn DateNormalizer>,
}

impl App {
    fn wizard(&self) -> WizardController {
        WizardController::new(self.api.clone(), self.api.clone(), self.dates.clone())
    }

    async fn edit(&self, id: &str) -> Result<WizardController, WizardError> {
        WizardController::load_for_edit(id, self.api.clone(), self.api.clone(), self.dates.clone())
            .await
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Profile wizard v{}", env!("CARGO_PKG_VERSION"));

    let session = Arc::new(FileSession::load(&config.session_file).await.map_err(report)?);
    let api = Arc::new(ApiClient::new(config.api_base_url.clone(), session.clone())?);
    info!(
        "API client ready (base: {}, dates: {:?})",
        config.api_base_url, config.date_strategy
    );
    let app = App {
        api,
        session,
        dates: config.date_strategy.normalizer(),
    };

    run(&app, cli.command).await
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Steps => {
            for (i, step) in STEPS.iter().enumerate() {
                println!("{:>2}. {:<28} {}", i + 1, step.title, step.description);
            }
        }
        Command::Parse { file } => {
            let mut wizard = app.wizard();
            wizard.select_parse_file(ResumeFile::from_path(&file).await.map_err(report)?);
            wizard.parse_and_fill().await.map_err(report)?;
            print_record(wizard.record())?;
        }
        Command::Create {
            draft,
            parse,
            attach,
        } => {
            let mut wizard = app.wizard().with_record(read_draft(&draft).await?);
            if let Some(path) = attach {
                wizard.attach_file(ResumeFile::from_path(&path).await.map_err(report)?);
            }
            if let Some(path) = parse {
                wizard.select_parse_file(ResumeFile::from_path(&path).await.map_err(report)?);
                wizard.parse_and_fill().await.map_err(report)?;
            }
            let outcome = wizard.submit().await.map_err(report)?;
            println!("{}", outcome.message);
        }
        Command::Show { id } => {
            let wizard = app.edit(&id).await.map_err(report)?;
            print_record(wizard.record())?;
        }
        Command::Update { id, draft, attach } => {
            let record = read_draft(&draft).await?;
            let mut wizard = app.edit(&id).await.map_err(report)?;
            wizard.adopt_draft(record);
            if let Some(path) = attach {
                wizard.attach_file(ResumeFile::from_path(&path).await.map_err(report)?);
            }
            let outcome = wizard.submit().await.map_err(report)?;
            println!("{}", outcome.message);
        }
        Command::List => {
            let mut list = ProfileList::new(app.api.clone(), app.session.clone());
            let profiles = list.load().await.map_err(report)?;
            if profiles.is_empty() {
                println!("No profiles yet.");
            }
            for profile in profiles {
                println!("{}  {}", profile.id, profile.display_name());
            }
        }
        Command::Delete { id } => {
            let mut list = ProfileList::new(app.api.clone(), app.session.clone());
            list.delete(&id).await.map_err(report)?;
            println!("Profile deleted successfully!");
        }
    }
    Ok(())
}

/// Logs the user-facing text for a failure and hands the error on.
fn report(err: WizardError) -> anyhow::Error {
    error!("{}", err.user_message());
    anyhow::Error::new(err)
}

async fn read_draft(path: &Path) -> Result<ProfileRecord> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Draft {} is not a profile", path.display()))
}

fn print_record(record: &ProfileRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
