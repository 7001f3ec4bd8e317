//! Conversion command.
//!
//! Checks run in a fixed order so the cheapest failures surface first:
//!
//! 1. **Input** — the netplan file must exist
//! 2. **Privilege** — writing system paths requires root
//! 3. **Load** — parse YAML and check the version
//! 4. **Translate** — build interface lines and wpa_supplicant documents
//! 5. **Emit** — print, or write the files
//!
//! Nothing is written unless translation succeeded.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use netplan_convert::emit::{check_privilege, emit, Destination, ReportFormat};
use netplan_convert::loader::{ensure_input_exists, load_file};
use netplan_convert::settings::{default_settings, load_settings};
use netplan_convert::translate::translate;

use crate::cli::Cli;

pub fn run_convert(args: Cli) -> Result<()> {
    ensure_input_exists(&args.input_file)?;

    let settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => default_settings(),
    };

    let destination = args.destination();
    if let Err(err) = check_privilege(&destination, &settings) {
        bail!(
            "{err}\nTry: sudo netplan-convert <input_file>\nOr use --output-dir to write to a custom directory"
        );
    }

    // JSON reports own stdout.
    let chatty = destination != Destination::DryRun(ReportFormat::Json);

    if chatty {
        println!("Loading configuration from {}...", args.input_file.display());
    }
    let config = load_file(&args.input_file)
        .with_context(|| format!("failed to load {}", args.input_file.display()))?;

    if chatty {
        println!("Converting configuration...");
    }
    let translation = translate(&config, &settings).context("failed to convert configuration")?;
    for warning in &translation.warnings {
        eprintln!("warning: {warning}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = emit(&translation, &destination, &settings, &mut out)
        .context("failed to write configuration files")?;
    if !written.is_empty() {
        writeln!(out, "Configuration files written successfully!")?;
    }
    out.flush()?;
    Ok(())
}
