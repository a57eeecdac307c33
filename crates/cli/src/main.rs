//! Relay CLI - runs one distribution job per invocation
//!
//! Reads a job file, executes it against the configured target and prints the
//! updated job plus the outcome as JSON on stdout.

mod logging;
mod wiring;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use relay_core::domain::{CaptionInfo, DistributionAction, JobData};
use relay_core::port::{BuiltinLocaleTable, CredentialStore};
use relay_core::{AppError, Disposition};
use relay_infra_system::LayeredCredentialStore;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

const DEFAULT_SCRATCH_DIR: &str = "~/.relay/scratch";

/// sysexits EX_TEMPFAIL: the host should retry the same job later
const EXIT_RETRYABLE: u8 = 75;
const EXIT_FATAL: u8 = 1;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Relay distribution job runner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML/JSON/YAML); environment RELAY_* overrides it
    #[arg(long, global = true, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a submit/update/delete job file
    Run {
        /// Job file (JSON, tagged by "operation")
        #[arg(short, long)]
        job: PathBuf,

        /// Scratch directory for upload staging
        #[arg(long, env = "RELAY_SCRATCH_DIR", default_value = DEFAULT_SCRATCH_DIR)]
        scratch_dir: String,

        /// Write the updated job here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which caption locale a language/label pair resolves to
    ResolveLocale {
        /// Internal language identifier (e.g. "English", "pt-BR")
        #[arg(short, long)]
        language: Option<String>,

        /// Caption label used when the language has no mapping
        #[arg(long)]
        label: Option<String>,
    },

    /// Check that app credentials are configured
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging()?;

    info!("Relay v{} starting", relay_core::VERSION);

    match cli.command {
        Commands::Run {
            job,
            scratch_dir,
            output,
        } => run_job(cli.config, job, &scratch_dir, output).await,

        Commands::ResolveLocale { language, label } => {
            let caption = CaptionInfo {
                asset_id: "cli".to_string(),
                version: String::new(),
                language,
                label,
                file_path: String::new(),
                action: DistributionAction::Submit,
            };
            match relay_core::application::distribution::resolve_locale(
                &BuiltinLocaleTable,
                &caption,
            ) {
                Ok(locale) => {
                    println!("{}", locale);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{} {}", "✗".red(), e);
                    Ok(ExitCode::from(EXIT_FATAL))
                }
            }
        }

        Commands::CheckConfig => {
            let store = LayeredCredentialStore::new(cli.config);
            let credentials = store.load().await?;

            let mut ok = true;
            for (name, value) in [
                ("app_id", &credentials.app_id),
                ("app_secret", &credentials.app_secret),
            ] {
                if value.is_empty() {
                    ok = false;
                    eprintln!("  {} {} is not configured", "✗".red(), name.bold());
                } else {
                    eprintln!("  {} {}", "✓".green(), name.bold());
                }
            }
            Ok(if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FATAL)
            })
        }
    }
}

async fn run_job(
    config_file: Option<PathBuf>,
    job_path: PathBuf,
    scratch_dir: &str,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let raw = tokio::fs::read_to_string(&job_path)
        .await
        .with_context(|| format!("Failed to read job file {}", job_path.display()))?;
    let mut job: JobData = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid job file {}", job_path.display()))?;

    let engine = wiring::build_engine(config_file, scratch_dir).await?;

    info!(
        operation = job.operation(),
        job_file = %job_path.display(),
        "Executing distribution job"
    );

    match engine.execute(&mut job).await {
        Ok(outcome) => {
            let report = json!({ "outcome": outcome, "job": job });
            write_report(&report, output.as_deref()).await?;
            eprintln!("{} {} completed", "✓".green().bold(), job.operation());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(operation = job.operation(), error = %e, "Distribution job failed");
            let disposition = e.disposition();
            let report = json!({
                "error": e.to_string(),
                "kind": error_kind(&e),
                "retryable": disposition == Disposition::Retryable,
                "job": job,
            });
            write_report(&report, output.as_deref()).await?;
            eprintln!("{} {} failed: {}", "✗".red().bold(), job.operation(), e);
            Ok(match disposition {
                Disposition::Retryable => ExitCode::from(EXIT_RETRYABLE),
                Disposition::Fatal => ExitCode::from(EXIT_FATAL),
            })
        }
    }
}

fn error_kind(err: &AppError) -> &'static str {
    match err {
        AppError::Config(_) => "configuration",
        AppError::Prerequisite(_) => "prerequisite",
        AppError::Validation(_) => "validation",
        AppError::ExternalApi { .. } => "external_api",
        AppError::Io(_) => "io",
    }
}

async fn write_report(report: &serde_json::Value, output: Option<&std::path::Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
