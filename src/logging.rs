use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `-v` is given. Stdout belongs to
/// command output, so diagnostics stay quiet and go to stderr.
const DEFAULT_LEVEL: &str = "warn";

/// Map the `-v` count to a filter directive.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = level_for_verbosity(verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(log_path) = log_file {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(file)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
