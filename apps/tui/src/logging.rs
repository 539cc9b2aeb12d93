use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go. The terminal UI owns stdout, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "rfc_finder=debug"
    } else {
        "rfc_finder=info"
    }
}

/// Installs the global subscriber. `--debug` overrides `RUST_LOG`.
pub fn init_logging(target: &LogTarget, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|e| color_eyre::eyre::eyre!("Failed to install logger: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_level() {
        assert_eq!(default_directive(false), "rfc_finder=info");
        assert_eq!(default_directive(true), "rfc_finder=debug");
    }
}
