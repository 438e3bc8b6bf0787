//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for Remarkup.
#[derive(Debug, Clone, Parser)]
#[command(name = "remarkup", version, about, long_about = None)]
pub struct Config {
    /// Input file, stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Server URL used to expand {T123} style references
    #[arg(short = 'u', long, env = "REMARKUP_BASE_URL")]
    pub base_url: String,

    /// Wrap output in a complete HTML document
    #[arg(long)]
    pub standalone: bool,

    /// Document title for standalone output
    #[arg(long, default_value = "Remarkup")]
    pub title: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an http(s) URL with a host, or
    /// the input file does not exist.
    pub fn validate(&self) -> Result<()> {
        let Some(rest) = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
        else {
            bail!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            );
        };

        if rest.trim_end_matches('/').is_empty() {
            bail!("Base URL has no host: {}", self.base_url);
        }

        if let Some(input) = self.input_path()
            && !input.exists()
        {
            bail!("Input file does not exist: {}", input.display());
        }

        Ok(())
    }

    /// Returns base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns input path, or None when reading from stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
