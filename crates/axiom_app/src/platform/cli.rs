//! CLI argument definitions for the Axiom terminal client.
//!
//! Uses `clap` with derive macros. Values given here win over the
//! `AXIOM_*` environment variables, which win over built-in defaults.

use axiom_app::ConfigOverrides;
use clap::Parser;
use log::LevelFilter;

use super::logging::LogDestination;

/// Axiom: ask questions about your indexed documents.
#[derive(Parser, Debug)]
#[command(name = "axiom", version, about)]
pub struct CliArgs {
    /// Backend endpoint root, e.g. http://127.0.0.1:8000/api.
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Number of passages requested per query.
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Delay between two revealed characters, in milliseconds.
    #[arg(long = "reveal-delay-ms")]
    pub reveal_delay_ms: Option<u64>,

    /// Give up on a backend call after this many seconds (default: wait forever).
    #[arg(long = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(short = 'l', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    /// Where log records go.
    #[arg(long = "log-to", value_enum, default_value_t = LogDestination::File)]
    pub log_to: LogDestination,
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            top_k: self.top_k,
            reveal_delay_ms: self.reveal_delay_ms,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}
