use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use netplan_convert::emit::{Destination, ReportFormat};

#[derive(Parser, Debug)]
#[command(name = "netplan-convert")]
#[command(about = "Convert netplan YAML to /etc/network/interfaces format")]
#[command(after_help = "Examples:
  # Dry run - print to stdout
  netplan-convert network-config.yaml --dry-run

  # Write to custom output directory
  netplan-convert network-config.yaml --output-dir ./output

  # Write directly to system paths (requires root)
  sudo netplan-convert network-config.yaml")]
pub struct Cli {
    /// Path to netplan YAML configuration file.
    pub input_file: PathBuf,
    /// Output directory for generated files (default: write to /etc).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Print generated configs to stdout instead of writing files.
    #[arg(short, long)]
    pub dry_run: bool,
    /// Dry-run output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Optional settings TOML overriding system paths and the wpa driver.
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Dry run wins over an output directory.
    pub fn destination(&self) -> Destination {
        if self.dry_run {
            let format = match self.format {
                OutputFormat::Text => ReportFormat::Text,
                OutputFormat::Json => ReportFormat::Json,
            };
            Destination::DryRun(format)
        } else if let Some(dir) = &self.output_dir {
            Destination::Directory(dir.clone())
        } else {
            Destination::System
        }
    }
}
