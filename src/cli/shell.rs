use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, Signal, SignalKind};

use crate::config::ProviderConfig;
use crate::llm::{Translator, REPL_PROMPT};

use super::{format_translation, raw_for_display};

const INTERRUPT_HINT: &str = "^C (use 'exit' to quit)";

/// Interactive loop: read a request, translate it, show the result, repeat.
/// Errors are printed and the loop keeps going; only `exit`, `quit`, EOF or
/// SIGTERM end it.
pub(super) async fn run_shell(translator: &Translator) -> anyhow::Result<()> {
    println!("AI-assisted mini shell");
    println!("Type 'exit' or 'quit' to leave");
    println!();

    if let Some(warning) = missing_api_key_warning(&translator.provider_config()) {
        println!("{warning}");
        println!();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    loop {
        print!("{REPL_PROMPT}");
        std::io::stdout().flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("Error reading input: {e}");
                        break;
                    }
                };

                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if should_exit(input) {
                    println!("Exiting...");
                    break;
                }

                handle_request(translator, input, &mut interrupt).await;
            }
            _ = interrupt.recv() => {
                println!("{INTERRUPT_HINT}");
            }
            _ = sigterm.recv() => {
                println!();
                println!("Received SIGTERM, shutting down...");
                tracing::info!("Shell terminated by SIGTERM");
                return Ok(());
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Ctrl-C while a request is in flight prints the hint and keeps waiting.
async fn handle_request(translator: &Translator, input: &str, interrupt: &mut Signal) {
    let translation = translator.translate(input);
    tokio::pin!(translation);
    let result = loop {
        tokio::select! {
            result = &mut translation => break result,
            _ = interrupt.recv() => println!("{INTERRUPT_HINT}"),
        }
    };

    match result {
        Ok(translation) => {
            print!("{}", format_translation(&translation));
        }
        Err(e) => {
            println!("Error processing request: {e}");
            if let Some(raw) = raw_for_display(&e) {
                println!("AI raw: {raw}");
            }
        }
    }
    println!();
}

fn should_exit(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "exit" || input == "quit"
}

/// Hosted providers fail every call without a key; say so up front.
fn missing_api_key_warning(config: &ProviderConfig) -> Option<String> {
    if !config.missing_api_key() {
        return None;
    }
    Some(format!(
        "WARNING: no API key configured for {provider}.\n  \
         Set it with: export AI_API_KEY=<your key>\n  \
         The shell will keep running but requests to {provider} will fail.",
        provider = config.provider
    ))
}
