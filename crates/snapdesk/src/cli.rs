use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend address; overrides `SNAPDESK_URL`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Milliseconds between snapshot refreshes; overrides `SNAPDESK_POLL_MS`.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Sets the level of logging (`RUST_LOG` takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the market snapshot on screen, refreshing it periodically.
    Watch,

    /// Ask the analysis endpoint a single question and print the answer.
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Snapshot refreshes plus a prompt; every line typed is a question.
    Panel,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}
