use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use semanticheck_core::config_file::{load_config, resolve_base_url};
use semanticheck_core::{
    DispatchResult, FileCandidate, HttpAnalysisClient, Mode, Notice, Session, Trigger, dispatch,
};

mod output;

use output::ColorMode;

/// SemantiCheck - compare two texts for plagiarism or check one for AI authorship
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Analysis service base URL (overrides SEMANTICHECK_URL and config)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two texts for plagiarism
    Compare {
        /// File holding the first text ("-" for stdin)
        text_a: PathBuf,

        /// File holding the second text ("-" for stdin)
        text_b: PathBuf,

        /// Request the detailed, model-assisted analysis
        #[arg(long)]
        detailed: bool,
    },

    /// Estimate whether a text was written by an AI
    Detect(DetectArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct DetectArgs {
    /// Text to check ("-" for stdin)
    #[arg(long)]
    text: Option<String>,

    /// A .txt or .docx file to upload
    #[arg(long)]
    file: Option<PathBuf>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    let config = load_config();
    let base_url = resolve_base_url(cli.server.as_deref(), &config);
    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    tracing::debug!(%base_url, "resolved service URL");

    let mut session = Session::new();
    let trigger = match cli.command {
        Command::Compare {
            text_a,
            text_b,
            detailed,
        } => {
            if is_stdin(&text_a) && is_stdin(&text_b) {
                anyhow::bail!("only one of the two texts can be read from stdin");
            }
            session.set_mode(Mode::Plagiarism);
            session.text_a = read_text(&text_a)?;
            session.text_b = read_text(&text_b)?;
            if detailed {
                Trigger::DetailedCheck
            } else {
                Trigger::QuickCheck
            }
        }
        Command::Detect(DetectArgs { text, file }) => {
            session.set_mode(Mode::AiDetection);
            if let Some(path) = file {
                if !path.is_file() {
                    anyhow::bail!("File not found: {}", path.display());
                }
                let Some(candidate) = FileCandidate::from_path(&path) else {
                    anyhow::bail!("Not a file path: {}", path.display());
                };
                if session.select_file(candidate).is_err() {
                    return report_notice(&mut session, color);
                }
            } else if let Some(text) = text {
                session.ai_text = if text == "-" {
                    read_stdin()?
                } else {
                    text
                };
            }
            Trigger::DetectAi
        }
    };

    let api = HttpAnalysisClient::new(base_url);
    let spinner = spinner(trigger);

    let outcome = tokio::select! {
        outcome = dispatch(&mut session, &api, trigger) => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.finish_and_clear();

    match outcome {
        None => {
            eprintln!("Interrupted.");
            Ok(ExitCode::from(130))
        }
        Some(DispatchResult::Rendered(view)) => {
            output::print_view(&mut std::io::stdout().lock(), &view, color)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(DispatchResult::Rejected(notice)) | Some(DispatchResult::Failed(notice)) => {
            print_notice(&notice, color)?;
            Ok(ExitCode::FAILURE)
        }
        Some(DispatchResult::Ignored) => {
            anyhow::bail!("{} is not available right now", trigger.label())
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        return read_stdin();
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))
}

/// Spinner on stderr so stdout stays clean for the result.
fn spinner(trigger: Trigger) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(format!("{}...", trigger.label()));
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn print_notice(notice: &Notice, color: ColorMode) -> std::io::Result<()> {
    let color = ColorMode(color.enabled() && std::io::stderr().is_terminal());
    output::print_notice(&mut std::io::stderr().lock(), notice, color)
}

fn report_notice(session: &mut Session, color: ColorMode) -> anyhow::Result<ExitCode> {
    if let Some(notice) = session.dismiss_notice() {
        print_notice(&notice, color)?;
    }
    Ok(ExitCode::FAILURE)
}
