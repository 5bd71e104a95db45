//! Series extraction tool
//!
//! Reads a delimited export of media titles and writes the unique series
//! names to `series_only.txt`, one per line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use showlist_core::{DEFAULT_INPUT_FILE, ExtractConfig, Extractor};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "extract-series")]
#[command(about = "Write the unique series names found in a media title export")]
#[command(version)]
struct Cli {
    /// Delimited file to read (tab, comma or semicolon separated)
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ExtractConfig::new().with_input(&cli.input);
    debug!(?config, "starting extraction");

    let extractor = Extractor::new(config).context("Failed to build extractor")?;
    let summary = extractor
        .run()
        .with_context(|| format!("Failed to extract series from {}", cli.input.display()))?;

    println!("{summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_defaults_to_input_csv() {
        let cli = Cli::try_parse_from(["extract-series"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("input.csv"));
    }

    #[test]
    fn input_is_positional() {
        let cli = Cli::try_parse_from(["extract-series", "viewing.tsv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("viewing.tsv"));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["extract-series", "a.csv", "b.csv"]).is_err());
        assert!(Cli::try_parse_from(["extract-series", "--output", "x"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
