//! Command-line arguments for the `datawizard` binary

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for datawizard
#[derive(Parser, Debug)]
#[command(name = "datawizard")]
#[command(author, version, about = "DataWizard - ask questions about a CSV file in plain language")]
#[command(long_about = r#"
DataWizard loads a CSV file and answers questions about it.

Each question is first checked for relevance to the loaded data. Off-topic
questions get a short polite reply; data questions are answered by an
analysis model that computes results and draws charts.

API keys are read from TOGETHER_API_KEY (relevance check) and GROQ_API_KEY
(analysis), also from a .env file in the working directory.

Configuration files are loaded from (in priority order):
1. --config <path>                         Explicit config file
2. ./datawizard.toml                       Project-level config
3. ~/.config/datawizard/config.toml        Global config

Example:
  datawizard --csv sales.csv
  datawizard -v --log-file session.jsonl
"#)]
pub struct Cli {
    /// CSV file to load at startup (otherwise use /load inside the REPL)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Log verbosity: -v shows cycle steps, -vv model traffic, -vvv everything
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the "Generating response..." spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Extra TOML file merged over the global and project files
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults plus the environment
    #[arg(long)]
    pub no_config: bool,

    /// List configuration sources and API key status, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a JSONL conversation log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "datawizard",
            "--csv",
            "sales.csv",
            "-vv",
            "--log-file",
            "log.jsonl",
        ]);
        assert_eq!(cli.csv, Some(PathBuf::from("sales.csv")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("log.jsonl")));
        assert!(!cli.quiet);
        assert!(!cli.no_config);
    }
}
