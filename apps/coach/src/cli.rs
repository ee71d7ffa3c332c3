use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::dashboard::{list_row, ArtifactFilter, ProfileSummary};
use crate::errors::AppError;
use crate::export::render_portfolio_html;
use crate::generation::generator::{generate_project, project_artifact, GenerateRequest};
use crate::llm_client::ConnectionStatus;
use crate::models::narrative::{Fragment, NarrativeStyle, NarrativeVariant, RewrittenNarrative};
use crate::models::project::{ArtifactId, ArtifactPayload, SavedArtifact};
use crate::models::settings::ProviderConfig;
use crate::models::virtual_project::GeneratedProjectData;
use crate::refiner::rewriter::{narrative_artifact, rewrite_experience, RewriteRequest};
use crate::state::AppState;
use crate::training::script::TrainingScript;
use crate::training::session::{ChatEntry, InterviewSession, Speaker};
use crate::{
    Commands, ConfigCommand, ExportArgs, GenerateArgs, InterviewArgs, ProjectsCommand, RefineArgs,
    SetConfigArgs,
};

const SAMPLE_NOTICE: &str =
    "(No API key configured, or the reply was incomplete: showing the built-in example.)";
const DELETE_PROMPT: &str = "Delete this project? This cannot be undone.";
const RESET_PROMPT: &str = "Restart the mock interview? The current conversation will be cleared.";

/// Reads answers and confirmations from stdin.
pub struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    pub async fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        print!("{prompt}");
        std::io::stdout().flush().context("Failed to flush stdout")?;
        let line = self
            .lines
            .next_line()
            .await
            .context("Failed to read from stdin")?;
        Ok(line)
    }

    /// Asks a yes/no question; anything but an explicit yes is a no.
    pub async fn confirm(&mut self, question: &str) -> Result<bool, AppError> {
        let answer = self.read_line(&format!("{question} [y/N] ")).await?;
        Ok(is_yes(answer.as_deref().unwrap_or("")))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Runs one subcommand against the shared state.
pub struct CliHandler {
    state: AppState,
    prompter: Prompter,
}

impl CliHandler {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            prompter: Prompter::new(),
        }
    }

    pub async fn execute(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config(args) => match args.command {
                ConfigCommand::Show => self.handle_config_show().await,
                ConfigCommand::Set(args) => self.handle_config_set(args).await,
                ConfigCommand::Test => self.handle_config_test().await,
            },
            Commands::Generate(args) => self.handle_generate(args).await,
            Commands::Refine(args) => self.handle_refine(args).await,
            Commands::Interview(args) => self.handle_interview(args).await,
            Commands::Projects(args) => match args.command {
                ProjectsCommand::List { filter } => self.handle_list(filter).await,
                ProjectsCommand::Show { id } => self.handle_show(id).await,
                ProjectsCommand::Delete { id, yes } => self.handle_delete(id, yes).await,
            },
            Commands::Profile => self.handle_profile().await,
            Commands::Export(args) => self.handle_export(args).await,
        }
    }

    async fn handle_config_show(&self) -> Result<(), AppError> {
        print_settings(&self.state.settings.current().await);
        Ok(())
    }

    /// Provider switch first, then explicit overrides, then one full save.
    async fn handle_config_set(&self, args: SetConfigArgs) -> Result<(), AppError> {
        let mut config = self.state.settings.current().await;
        if let Some(provider) = args.provider {
            config = config.with_provider(provider.into());
        }
        if let Some(base_url) = args.base_url {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(model) = args.model {
            config.model = model.trim().to_string();
        }
        if let Some(api_key) = args.api_key {
            config.api_key = api_key.trim().to_string();
        }

        self.state.settings.save(config.clone()).await?;
        println!("Settings saved.");
        print_settings(&config);
        Ok(())
    }

    async fn handle_config_test(&self) -> Result<(), AppError> {
        let _pending = self.state.gates.connection_test.try_begin()?;
        let config = self.state.settings.current().await;

        println!("{}", describe_status(&ConnectionStatus::InProgress));
        let status = self.state.llm.check_connection(&config).await;
        match status {
            ConnectionStatus::Failed(message) => Err(AppError::Validation(format!(
                "Connection failed: {message}"
            ))),
            other => {
                println!("{}", describe_status(&other));
                Ok(())
            }
        }
    }

    async fn handle_generate(&mut self, args: GenerateArgs) -> Result<(), AppError> {
        let request = GenerateRequest {
            industry: args.industry,
            role: args.role,
            project_type: args.project_type,
        };

        let draft = {
            let _pending = self.state.gates.generate.try_begin()?;
            let config = self.state.settings.current().await;
            println!("Generating project...");
            generate_project(&self.state.llm, &config, &request).await?
        };

        if draft.is_sample() {
            println!("{SAMPLE_NOTICE}");
        }
        print_project(&draft.payload);

        if args.save || self.prompter.confirm("Save this project?").await? {
            let id = self
                .state
                .projects
                .add(project_artifact(draft.payload, &request))
                .await?;
            println!("Saved as project {id}. Rehearse it with `career-coach interview --project {id}`.");
        }
        Ok(())
    }

    async fn handle_refine(&mut self, args: RefineArgs) -> Result<(), AppError> {
        if args.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter a work description to rewrite.".to_string(),
            ));
        }
        let request = RewriteRequest {
            company: args.company,
            role: args.role,
            target_role: args.target_role,
            description: args.description,
        };

        let draft = {
            let _pending = self.state.gates.refine.try_begin()?;
            let config = self.state.settings.current().await;
            println!("Rewriting experience...");
            rewrite_experience(&self.state.llm, &config, &request).await?
        };

        if draft.is_sample() {
            println!("{SAMPLE_NOTICE}");
        }
        print_narrative(&draft.payload);

        let chosen = draft.payload.variant(args.style);
        println!();
        println!("{}", TrainingScript::from_rewrite(&request, chosen).render(false));

        let question = format!("Save the {} version?", args.style);
        if args.save || self.prompter.confirm(&question).await? {
            let artifact = narrative_artifact(draft.payload, args.style, &request);
            let id = self.state.projects.add(artifact).await?;
            println!(
                "Saved as project {id}. Rehearse it with `career-coach interview --project {id} --style {}`.",
                args.style
            );
        }
        Ok(())
    }

    async fn handle_interview(&mut self, args: InterviewArgs) -> Result<(), AppError> {
        let script = match args.project {
            Some(id) => {
                let artifact = self.find(id).await?;
                TrainingScript::from_artifact(&artifact, args.style)
            }
            None => TrainingScript::default(),
        };

        println!("== {} ==", script.mode.heading());
        println!("Now rehearsing: {}", script.headline());
        println!("{}", script.render(args.mask));
        println!();
        println!("Commands: /script shows the script, /reset starts over, /quit leaves.");

        let mut session = InterviewSession::new();
        print_entry(&session.transcript()[0]);

        loop {
            let Some(line) = self.prompter.read_line("> ").await? else {
                break;
            };
            match line.trim() {
                "" => continue,
                "/quit" | "/exit" => break,
                "/script" => println!("{}", script.render(false)),
                "/reset" => {
                    if self.prompter.confirm(RESET_PROMPT).await? {
                        session.reset();
                        print_entry(&session.transcript()[0]);
                    }
                }
                answer => {
                    let _pending = self.state.gates.interview.try_begin()?;
                    let config = self.state.settings.current().await;
                    match session.send(&self.state.llm, &config, answer).await {
                        Ok(entry) => print_entry(entry),
                        // A failed turn does not end the session
                        Err(e) if e.is_llm() => eprintln!("{}", e.notice()),
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        info!("Interview ended after {} turns", session.transcript().len());
        Ok(())
    }

    async fn handle_list(&self, filter: ArtifactFilter) -> Result<(), AppError> {
        let config = self.state.settings.current().await;
        if config.has_credential() {
            println!("API settings: configured ({}, {})", config.provider, config.model);
        } else {
            println!("API settings: not configured, results use the built-in examples");
        }

        let projects = self.state.projects.list().await;
        let shown = filter.apply(&projects);
        if shown.is_empty() {
            println!("No projects yet. Create one with `generate` or `refine`.");
            return Ok(());
        }
        for artifact in shown {
            println!("{}", list_row(artifact));
        }
        Ok(())
    }

    async fn handle_show(&self, id: ArtifactId) -> Result<(), AppError> {
        let artifact = self.find(id).await?;
        println!("{}", list_row(&artifact));
        println!();
        match &artifact.payload {
            ArtifactPayload::GeneratedProject(data) => print_project(data),
            ArtifactPayload::RewrittenNarrative(narrative) => print_narrative(narrative),
        }
        Ok(())
    }

    async fn handle_delete(&mut self, id: ArtifactId, yes: bool) -> Result<(), AppError> {
        let Some(artifact) = self.state.projects.get(id).await else {
            println!("No project with id {id}; nothing deleted.");
            return Ok(());
        };

        println!("{}", list_row(&artifact));
        if !yes && !self.prompter.confirm(DELETE_PROMPT).await? {
            println!("Cancelled.");
            return Ok(());
        }

        if self.state.projects.remove(id).await? {
            println!("Deleted project {id}.");
        } else {
            println!("No project with id {id}; nothing deleted.");
        }
        Ok(())
    }

    async fn handle_profile(&self) -> Result<(), AppError> {
        let projects = self.state.projects.list().await;
        let summary = ProfileSummary::from_artifacts(&projects);

        println!("Saved projects:        {}", summary.total());
        println!("Virtual internships:   {}", summary.generated);
        println!("Rewritten experiences: {}", summary.rewritten);
        if summary.samples > 0 {
            println!("(including {} built-in example)", summary.samples);
        }

        for (heading, filter) in [
            ("Virtual internships", ArtifactFilter::Generated),
            ("Rewritten experiences", ArtifactFilter::Rewritten),
        ] {
            let section = filter.apply(&projects);
            if section.is_empty() {
                continue;
            }
            println!();
            println!("== {heading} ==");
            for artifact in section {
                println!("{}", profile_line(artifact));
            }
        }
        println!();
        println!("Run `career-coach export` for a print-ready copy.");
        Ok(())
    }

    async fn handle_export(&self, args: ExportArgs) -> Result<(), AppError> {
        let projects = self.state.projects.list().await;
        let html = render_portfolio_html(&projects);
        write_export(&args.output, html).await?;
        println!(
            "Portfolio written to {}. Open it in a browser to print it.",
            args.output.display()
        );
        Ok(())
    }

    async fn find(&self, id: ArtifactId) -> Result<SavedArtifact, AppError> {
        self.state
            .projects
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No project with id {id}.")))
    }
}

fn describe_status(status: &ConnectionStatus) -> String {
    match status {
        ConnectionStatus::InProgress => "Testing connection...".to_string(),
        ConnectionStatus::Succeeded => "Connection succeeded.".to_string(),
        ConnectionStatus::Failed(message) => format!("Connection failed: {message}"),
    }
}

fn print_settings(config: &ProviderConfig) {
    println!("Provider: {}", config.provider);
    println!("Base URL: {}", config.base_url);
    println!("Model:    {}", config.model);
    println!("API key:  {}", config.masked_api_key());
}

fn print_entry(entry: &ChatEntry) {
    match (entry.speaker, entry.flagged) {
        (Speaker::Assistant, true) => println!("{} [feedback]: {}", entry.speaker.label(), entry.text),
        _ => println!("{}: {}", entry.speaker.label(), entry.text),
    }
}

/// A bad output path is the user's to fix, so the io error is shown as-is.
async fn write_export(path: &Path, html: String) -> Result<(), AppError> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| AppError::Validation(format!("Could not write {}: {e}", path.display())))
}

fn profile_line(artifact: &SavedArtifact) -> String {
    format!(
        "{}\n  {} · {}",
        artifact.title, artifact.target_role, artifact.created_date
    )
}

fn print_project(data: &GeneratedProjectData) {
    let background = &data.background;
    println!("== Background ==");
    println!("Goal:       {}", background.target);
    println!("Your role:  {}", background.role_definition);
    println!("Value:      {}", background.business_value);
    if !background.tech_stack.is_empty() {
        println!("Toolkit:    {}", background.tech_stack.join(", "));
    }
    println!("Challenge:  {}", background.core_challenges);

    println!();
    println!("== Timeline ==");
    for phase in &data.timeline {
        println!("{} ({})", phase.phase, phase.duration);
        for item in &phase.action_items {
            println!("  - {item}");
        }
        if !phase.deliverables.is_empty() {
            println!("  Deliverables: {}", phase.deliverables.join(", "));
        }
        println!("  Interview focus: {}", phase.interview_focus);
    }

    let competency = &data.competency;
    println!();
    println!("== Competency ==");
    for score in &competency.radar {
        let bar = "#".repeat(usize::from(score.value / 10));
        println!(
            "{:<22} {:>3} {:<10} {}",
            score.dimension, score.value, bar, score.label
        );
    }
    for qa in &competency.interview_qa {
        println!();
        println!("Q [{}]: {}", qa.tag, qa.question);
        println!("A: {}", qa.answer);
    }
    if !competency.portfolio_assets.is_empty() {
        println!();
        println!("Portfolio assets:");
        for asset in &competency.portfolio_assets {
            println!("  - {asset}");
        }
    }
}

fn print_narrative(narrative: &RewrittenNarrative) {
    for style in NarrativeStyle::ALL {
        let variant = narrative.variant(style);
        println!();
        println!("== {} ({style}) ==", variant.title);
        println!("{}", style.advice());
        println!("{}", highlighted(variant));
        for fragment in &variant.content {
            if let Fragment::Keyword { text, desc } = fragment {
                if !desc.is_empty() {
                    println!("  * {text}: {desc}");
                }
            }
        }
    }
}

/// The variant text with keywords in brackets.
fn highlighted(variant: &NarrativeVariant) -> String {
    variant
        .content
        .iter()
        .map(|fragment| match fragment {
            Fragment::Text { text } => text.clone(),
            Fragment::Keyword { text, .. } => format!("[{text}]"),
        })
        .collect()
}
