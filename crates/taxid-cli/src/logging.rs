//! Stderr logging for the `taxid` binary.
//!
//! `RUST_LOG` wins when set. Otherwise `--verbose` enables `debug`,
//! `--quiet` limits output to `error`, and the default is `warn`.
use tracing_subscriber::EnvFilter;

/// Returns the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the global `tracing` subscriber, writing to stderr.
pub fn init(quiet: bool, verbose: bool, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_ansi(ansi)
        .try_init();
    if let Err(err) = installed {
        eprintln!("warning: logging disabled: {err}");
    }
}
