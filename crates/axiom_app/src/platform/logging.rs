//! Logger setup for the axiom binary.
//!
//! The conversation owns stdout, so the default destination is `./axiom.log`
//! in the working directory. Each run appends to the same file.

use std::fs::{File, OpenOptions};

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./axiom.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Append to ./axiom.log.
    File,
    /// stderr only; interleaves with the conversation.
    Terminal,
    Both,
}

impl LogDestination {
    fn wants_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn wants_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = record_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match open_log_file() {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("warning: cannot open {LOG_FILE}: {err}"),
        }
    }

    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn record_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}

fn open_log_file() -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(LOG_FILE)
}
