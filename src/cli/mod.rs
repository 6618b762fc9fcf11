//! Command-line interface for kujo.
//!
//! kujo is a filter: it reads a manifest stream, renames the Jobs that opted
//! in, and writes the result to stdout. Diagnostics go to stderr so the output
//! can be piped straight into `kubectl apply -f -`.
//!
//! # Example
//!
//! ```bash
//! kustomize build overlays/prod | kujo | kubectl apply -f -
//! kujo --file manifests.yaml --verbose
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::pipeline::suffix_jobs;

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`] so tests can inspect
/// the effective settings without installing a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter, used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Manifest file to read, `None` for stdin.
    pub input: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            input: None,
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over [`log_level`](Self::log_level).
    /// Calling this more than once is harmless.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Read the whole input stream.
    pub fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read manifests from {}", path.display())),
            None => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read manifests from stdin")?;
                Ok(input)
            }
        }
    }
}

/// Hash and suffix Kubernetes Jobs by the ConfigMaps and Secrets they use.
///
/// Jobs annotated with `kujo.sphc.io: "true"` are renamed to
/// `<name>-<suffix>`, where the suffix changes whenever the Job's spec or any
/// referenced ConfigMap or Secret in the input changes.
#[derive(Parser, Debug)]
#[command(name = "kujo", version, author, about)]
pub struct Cli {
    /// Read manifests from a file instead of stdin (`-` means stdin)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Run kujo with the parsed arguments.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        Self::execute_with_config(&config)
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// ```rust
    /// use clap::Parser;
    /// use kujo::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["kujo", "--verbose"]);
    /// assert_eq!(cli.build_config().log_level, "debug");
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            input: self.file.clone().filter(|path| path.as_os_str() != "-"),
        }
    }

    /// Read, suffix and print, without touching the global subscriber.
    pub fn execute_with_config(config: &CliConfig) -> Result<()> {
        let input = config.read_input()?;
        let output = suffix_jobs(&input)?;

        // println! adds the only trailing newline
        let output = output.strip_suffix('\n').unwrap_or(&output);
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
