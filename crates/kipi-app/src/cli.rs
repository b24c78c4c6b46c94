use std::path::PathBuf;

use clap::Parser;

/// kipi: a terminal chat client for Google Gemini.
#[derive(Parser, Debug)]
#[command(name = "kipi", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. debug, kipi=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Gemini API key for this session.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model to start with.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Print replies all at once instead of typing them out.
    #[arg(long)]
    pub batch: bool,

    /// Disable the delay between typed characters.
    #[arg(long)]
    pub no_delay: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
