//! Log setup for the console binary.
//!
//! Logs go to stderr so they never mix with session output on stdout.
//! A `RUST_LOG` value wins over the verbosity flags.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Crates whose events follow the requested level
const CONSOLE_CRATES: [&str; 2] = ["mig_client", "mig_console"];

/// Level for the number of `-v` flags given.
pub fn level_from_verbosity(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter used when `RUST_LOG` is unset. HTTP and TLS dependencies stay at
/// `warn`; only the console crates get louder.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = String::from("warn");
    for krate in CONSOLE_CRATES {
        directives.push_str(&format!(",{krate}={level}"));
    }
    directives
}

/// Install the global subscriber, as plain text or JSON lines.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let output = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let output: Box<dyn Layer<Registry> + Send + Sync> = if json {
        output.json().boxed()
    } else {
        output.boxed()
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .is_ok()
}
