mod cli;
mod config;
mod dashboard;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod pending;
mod refiner;
mod state;
mod store;
mod training;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::CliHandler;
use crate::config::Config;
use crate::dashboard::ArtifactFilter;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::narrative::NarrativeStyle;
use crate::models::project::ArtifactId;
use crate::models::settings::Provider;
use crate::state::AppState;

#[derive(Parser)]
#[command(
    name = "career-coach",
    about = "Interview preparation coach backed by Gemini or an OpenAI-compatible model",
    long_about = "Career Coach - build and rehearse interview stories

WORKFLOW:
  1. Point the coach at a model (without a key it runs on built-in examples)
  2. Generate a virtual internship project, or rewrite a real experience
  3. Save what you like and rehearse it with the mock interviewer

QUICK START:
  career-coach config set --provider openai --api-key <KEY>
  career-coach generate --industry Retail --role \"Data analyst\" --project-type \"Churn dashboard\"
  career-coach refine --company ABC --role \"Finance intern\" --description \"...\"
  career-coach projects list
  career-coach interview --project <ID>
  career-coach export",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging for the coach; overrides RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show, change or test the model provider settings
    #[command(aliases = &["cfg"])]
    Config(ConfigArgs),

    /// Generate a virtual internship project from a few keywords
    #[command(aliases = &["gen"])]
    Generate(GenerateArgs),

    /// Rewrite a real work description in three registers
    Refine(RefineArgs),

    /// Rehearse with the mock interviewer
    Interview(InterviewArgs),

    /// Browse and delete saved projects
    #[command(aliases = &["ls"])]
    Projects(ProjectsArgs),

    /// Show what has been saved so far
    Profile,

    /// Write the saved projects to a print-ready HTML file
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current settings (the key is masked)
    Show,
    /// Change settings. Switching provider resets base URL and model to its defaults
    Set(SetConfigArgs),
    /// Send a short test request with the current settings
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    Gemini,
    #[value(name = "openai")]
    OpenAi,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => Provider::Gemini,
            ProviderArg::OpenAi => Provider::OpenAi,
        }
    }
}

#[derive(Args)]
pub struct SetConfigArgs {
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "")]
    pub industry: String,

    #[arg(long, default_value = "")]
    pub role: String,

    #[arg(long, default_value = "")]
    pub project_type: String,

    /// Save the result without asking
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct RefineArgs {
    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub role: String,

    #[arg(long, default_value = "")]
    pub target_role: String,

    #[arg(short, long)]
    pub description: String,

    /// Version to save: conservative, growth or leadership
    #[arg(long, default_value_t = NarrativeStyle::default())]
    pub style: NarrativeStyle,

    /// Save the chosen version without asking
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct InterviewArgs {
    /// Saved project to rehearse
    #[arg(short, long)]
    pub project: Option<ArtifactId>,

    /// Version of a rewritten experience to rehearse
    #[arg(long, default_value_t = NarrativeStyle::default())]
    pub style: NarrativeStyle,

    /// Hide the script answers for recall practice
    #[arg(long)]
    pub mask: bool,
}

#[derive(Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// List saved projects, newest first
    List {
        #[arg(long, value_enum, default_value_t = ArtifactFilter::All)]
        filter: ArtifactFilter,
    },
    /// Print one saved project in full
    Show { id: ArtifactId },
    /// Delete a saved project permanently
    #[command(aliases = &["rm"])]
    Delete {
        id: ArtifactId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(short, long, default_value = "portfolio.html")]
    pub output: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, &config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting career-coach v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("Error: {}", e.notice());
        if e.is_llm() {
            eprintln!("Check the provider settings with `career-coach config show` and `config test`.");
        }
        std::process::exit(1);
    }
}

/// `--verbose` wins over `RUST_LOG`, which wins over the configured level.
fn log_filter(verbose: bool, rust_log: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME")));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log))
    })
}

async fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    let llm = LlmClient::new()?;
    info!("Using data directory {}", config.data_dir.display());
    let state = AppState::from_config(config, llm).await?;

    let mut handler = CliHandler::new(state);
    handler.execute(command).await
}
