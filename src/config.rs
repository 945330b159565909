// src/config.rs
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches, Parser};
use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/ask";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the MANIT Bhopal AI Assistant", long_about = None)]
pub struct Cli {
    /// Answer service URL
    #[arg(long, env = "ASK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long, env = "ASK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Number of messages kept on screen
    #[arg(long, env = "CHAT_HISTORY", default_value_t = 20)]
    pub history: usize,

    /// Print the references returned with each answer
    #[arg(long, env = "SHOW_REFERENCES")]
    pub show_references: bool,

    /// Render width in columns
    #[arg(long, env = "CHAT_WIDTH", default_value_t = 80)]
    pub width: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
    pub history: usize,
    pub show_references: bool,
    pub width: usize,
}

impl Config {
    /// Load `.env` (if present), then parse the process arguments.
    pub fn load() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::load_from_args(std::env::args_os())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| AppError::Config(e.to_string()))?;
        Self::try_from(cli)
    }

    /// Like [`Config::load_from_args`], but the `ASK_*`/`CHAT_*` variables
    /// are not consulted: only flags and built-in defaults apply.
    pub fn from_args<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)
            .map_err(|e| AppError::Config(e.to_string()))?;
        let cli = Cli::from_arg_matches(&matches).map_err(|e| AppError::Config(e.to_string()))?;
        Self::try_from(cli)
    }
}

impl TryFrom<Cli> for Config {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let endpoint = Url::parse(&cli.endpoint)
            .map_err(|e| AppError::Config(format!("invalid endpoint {:?}: {e}", cli.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "endpoint must be http or https, got {}",
                endpoint.scheme()
            )));
        }
        if cli.history == 0 {
            return Err(AppError::Config("history must be at least 1".to_string()));
        }

        Ok(Self {
            endpoint,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            history: cli.history,
            show_references: cli.show_references,
            width: cli.width.max(20),
        })
    }
}
