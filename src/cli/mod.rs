use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::llm::{TranslateError, Translation, Translator};

mod shell;
mod translate;

#[derive(Parser)]
#[command(
    name = "neri",
    about = "Translate natural language into shell commands with an AI provider"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Translate a single request and print the command
    Translate {
        /// The natural language request
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config = Config::load();
    let translator = Translator::from_config(&config)?;

    match cli.command {
        Some(Commands::Translate { query }) => {
            translate::translate(&translator, &query.join(" ")).await?;
        }
        Some(Commands::Shell) | None => {
            shell::run_shell(&translator).await?;
        }
    }

    Ok(())
}

/// Lines shown for a successful translation. The command is never executed.
fn format_translation(translation: &Translation) -> String {
    let mut out = String::new();
    if !translation.raw.is_empty() {
        out.push_str(&format!("AI raw: {}\n", translation.raw));
    }
    out.push_str(&format!("CMD: {}\n", translation.command));
    out
}

/// Raw provider text worth showing next to an error, if any.
fn raw_for_display(error: &TranslateError) -> Option<&str> {
    error.raw().filter(|raw| !raw.trim().is_empty())
}
