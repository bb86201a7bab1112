use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::client::{DEFAULT_BACKEND_URL, HealthStatus, HttpClassifier, spawn_health_probe};
use crate::clipboard::SystemClipboard;
use crate::controller::{AnalysisController, COPY_CONFIRMATION, Outcome, TextEdit};
use crate::history::{FileHistoryStore, HistoryCache};
use crate::utils::{
    default_log_dir, default_storage_path, init_file_logging, init_stderr_logging,
    normalize_backend_url, sanitize_for_display,
};

#[derive(Parser)]
#[command(name = "email-classifier")]
#[command(version)]
#[command(about = "Classify emails as productive or unproductive and draft a reply", long_about = None)]
pub struct Cli {
    /// Base URL of the classification backend
    #[arg(long, global = true, env = "EMAIL_CLASSIFIER_BACKEND", default_value = DEFAULT_BACKEND_URL)]
    pub backend: String,

    /// Local store holding the analysis history
    #[arg(long, global = true, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Skip the backend connectivity probe at start-up
    #[arg(long, global = true)]
    pub no_health_check: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one email and print the category and suggested reply
    Analyze {
        /// Email text; read from stdin when neither this nor FILE is given
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// .txt or .pdf file to analyze
        file: Option<PathBuf>,

        /// Also copy the suggested reply to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// List stored analyses, newest first
    History,
    /// Check that the backend is reachable
    Health,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let backend = normalize_backend_url(&cli.backend)?;
    let history_path = match &cli.history_file {
        Some(path) => path.clone(),
        None => default_storage_path()?,
    };

    match cli.command {
        None => run_tui(&backend, history_path, cli.no_health_check),
        Some(Commands::Analyze { text, file, copy }) => {
            init_stderr_logging();
            analyze(&backend, history_path, text, file, copy)
        }
        Some(Commands::History) => {
            init_stderr_logging();
            show_history(history_path)
        }
        Some(Commands::Health) => {
            init_stderr_logging();
            check_health(&backend)
        }
    }
}

fn build_controller(history_path: PathBuf) -> AnalysisController {
    let history = HistoryCache::new(Box::new(FileHistoryStore::new(history_path)));
    AnalysisController::new(history, Box::new(SystemClipboard::new()))
}

fn run_tui(backend: &str, history_path: PathBuf, skip_health_check: bool) -> Result<()> {
    // A missing log directory must not keep the screen from opening
    let _guard = match default_log_dir().and_then(|dir| init_file_logging(&dir)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let classifier = HttpClassifier::new(backend).context("Failed to build HTTP client")?;
    info!(backend, history = %history_path.display(), "starting interactive session");

    if !skip_health_check {
        // Detached; the outcome is only logged
        let _ = spawn_health_probe(classifier.clone());
    }

    let controller = build_controller(history_path);
    crate::tui::run_interactive(controller, Arc::new(classifier))
}

fn read_stdin() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Reading email from stdin, finish with Ctrl+D");
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text).context("Failed to read email from stdin")?;
    Ok(text)
}

fn analyze(
    backend: &str,
    history_path: PathBuf,
    text: Option<String>,
    file: Option<PathBuf>,
    copy: bool,
) -> Result<()> {
    let classifier = HttpClassifier::new(backend).context("Failed to build HTTP client")?;
    let mut controller = build_controller(history_path);

    match (text, file) {
        (_, Some(path)) => {
            controller.select_file(&path).with_context(|| path.display().to_string())?;
        }
        (Some(text), None) => {
            controller.edit_text(TextEdit::Replace(text));
        }
        (None, None) => {
            controller.edit_text(TextEdit::Replace(read_stdin()?));
        }
    }

    controller.analyze_with(&classifier)?;

    if let Some(Outcome::Failure(message)) = controller.state().outcome() {
        bail!("{}", message);
    }
    let view = controller.result_view().ok_or_else(|| anyhow!("No result to display"))?;

    println!("Categoria: {} ({})", sanitize_for_display(&view.label), view.caption);
    println!();
    println!("Resposta sugerida:");
    println!("{}", sanitize_for_display(view.reply));

    if copy {
        controller.copy_reply();
        if let Some(status) = controller.state().status() {
            if status.text == COPY_CONFIRMATION {
                eprintln!("{}", status.text);
            } else {
                eprintln!("Warning: {}", status.text);
            }
        }
    }

    Ok(())
}

fn show_history(history_path: PathBuf) -> Result<()> {
    let cache = HistoryCache::new(Box::new(FileHistoryStore::new(&history_path)));

    println!("Histórico de análises");
    println!("=====================");
    println!("Arquivo: {}", history_path.display());
    println!();

    if cache.is_empty() {
        println!("Nenhuma análise registrada.");
        return Ok(());
    }

    for entry in cache.entries() {
        let preview = sanitize_for_display(entry.text.lines().next().unwrap_or(""));
        let reply = sanitize_for_display(entry.response.lines().next().unwrap_or(""));
        println!(
            "{} [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sanitize_for_display(&entry.category),
            preview
        );
        println!("    -> {}", reply);
    }
    println!();
    println!("Total: {} análise(s)", cache.len());

    Ok(())
}

fn check_health(backend: &str) -> Result<()> {
    let classifier = HttpClassifier::new(backend).context("Failed to build HTTP client")?;

    match classifier.check_health() {
        HealthStatus::Healthy => {
            println!("Backend {}: conectado", classifier.base_url());
            Ok(())
        }
        HealthStatus::Unhealthy(status) => {
            bail!("Backend {} respondeu com status {}", classifier.base_url(), status)
        }
        HealthStatus::Unreachable(e) => {
            bail!("Não foi possível conectar ao backend {}: {}", classifier.base_url(), e)
        }
    }
}
