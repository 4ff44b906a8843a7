// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, info_span, Instrument};

use skill_matcher::controller::RequestState;
use skill_matcher::core::service_client::into_outcome;
use skill_matcher::core::{AnalysisBackend, ServiceClient};
use skill_matcher::presenter::{categorize, present, render_state, ReportView};
use skill_matcher::utils::{save_report, SavedReport};
use skill_matcher::{ClientConfig, InputCollector, ResumeFile, SubmissionController};

#[derive(Parser)]
#[command(name = "skillmatch")]
#[command(about = "Match a resume against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a resume and job description to the analysis service
    Analyze {
        /// Resume to upload (PDF)
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Job description text
        #[arg(long, conflicts_with = "job_file")]
        job_description: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        job_file: Option<PathBuf>,
        /// Ask the service for an AI-generated summary
        #[arg(long)]
        use_ai: bool,
        /// Analysis service base URL, overrides configuration
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Directory to save a successful report into
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show which band a match score falls into
    Categorize {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct AnalyzeArgs {
    pub resume: Option<PathBuf>,
    pub job_description: Option<String>,
    pub job_file: Option<PathBuf>,
    pub use_ai: bool,
    pub format: OutputFormat,
    pub save: Option<PathBuf>,
}

pub async fn handle_command(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Analyze {
            resume,
            job_description,
            job_file,
            use_ai,
            api_url,
            format,
            save,
        } => {
            let config = ClientConfig::load(api_url)?;
            info!(
                "Analysis service: {} (environment: {})",
                config.api_base_url, config.environment
            );
            let args = AnalyzeArgs {
                resume,
                job_description,
                job_file,
                use_ai,
                format,
                save,
            };
            run_analysis(&config, args).await
        }

        Command::Categorize { score } => {
            let category = categorize(score);
            println!("{} ({})", category.label(), category.color());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_analysis(config: &ClientConfig, args: AnalyzeArgs) -> Result<ExitCode> {
    let mut collector = InputCollector::new();

    if let Some(path) = &args.resume {
        collector.set_resume_file(Some(ResumeFile::from_path(path).await?));
    }

    let job_description = match (&args.job_description, &args.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        (None, None) => String::new(),
    };
    collector.set_job_description(job_description);
    collector.set_use_enhanced_analysis(args.use_ai);

    let client = ServiceClient::new(config.api_base_url.clone())?;
    let mut controller = SubmissionController::new(client);

    if let Some(pending) = controller.begin(collector.input())? {
        eprint!("{}", render_state(&controller.state()));

        let span = info_span!("analysis", request_id = %pending.request_id);
        let reply = controller
            .backend()
            .analyze(&pending.submission)
            .instrument(span)
            .await;
        controller.settle(into_outcome(reply));
    }

    let state = controller.state();
    print_state(&state, args.format)?;

    if let (RequestState::Succeeded(result), Some(dir)) = (&state, &args.save) {
        let view = ReportView::from_result(result);
        let file_name = collector
            .input()
            .resume_file
            .as_ref()
            .map(|f| f.file_name.as_str())
            .unwrap_or_default();
        let path = save_report(
            dir,
            &SavedReport {
                generated_at: chrono::Utc::now(),
                resume_file: file_name,
                use_ai: args.use_ai,
                report: &view,
            },
        )
        .await?;
        eprintln!("Report saved to {}", path.display());
    }

    info!("Analysis finished in state: {:?}", state);

    Ok(match state {
        RequestState::Succeeded(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn print_state(state: &RequestState, format: OutputFormat) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    match format {
        OutputFormat::Text => write!(stdout, "{}", render_state(state))?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&present(state))
                .context("Failed to serialize result")?;
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
