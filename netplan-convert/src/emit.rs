//! Writing translated output: dry-run reports, an output directory, or the
//! live system paths.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use ifupdown_core::{ensure_dir, write_file, write_private_file, WriteError};
use serde::Serialize;
use thiserror::Error;

use crate::privilege::is_privileged;
use crate::settings::Settings;
use crate::translate::Translation;

/// Width of the `=` rule around dry-run section titles.
const RULE_WIDTH: usize = 60;

/// File name of the interfaces file in directory mode.
pub const INTERFACES_FILE_NAME: &str = "interfaces";
/// Subdirectory holding wpa_supplicant files in directory mode.
pub const WPA_SUBDIR: &str = "wpa_supplicant";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Where translated files go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Print to the report stream; touch nothing on disk.
    DryRun(ReportFormat),
    /// `<dir>/interfaces` and `<dir>/wpa_supplicant/*.conf`.
    Directory(PathBuf),
    /// Paths from [`Settings`]; needs root.
    System,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("root privileges required to write to {}", path.display())]
    NotPrivileged { path: PathBuf },
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct DryRunReport<'a> {
    interfaces: Artifact<'a>,
    wpa_supplicant: Vec<WirelessArtifact<'a>>,
}

#[derive(Debug, Serialize)]
struct Artifact<'a> {
    path: String,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WirelessArtifact<'a> {
    interface: &'a str,
    path: String,
    content: &'a str,
}

/// Fail with [`EmitError::NotPrivileged`] when `destination` is the live
/// system and the process is not root. Other destinations always pass.
pub fn check_privilege(destination: &Destination, settings: &Settings) -> Result<(), EmitError> {
    if *destination == Destination::System && !is_privileged() {
        return Err(EmitError::NotPrivileged {
            path: settings.interfaces_path.clone(),
        });
    }
    Ok(())
}

/// Emit `translation` to `destination`.
///
/// Progress lines and dry-run output go to `out`. Returns the files written,
/// which is empty for a dry run. A failure part way through leaves files that
/// were already written in place. Callers run [`check_privilege`] first;
/// without it a system write fails on the first file instead.
pub fn emit<W: Write>(
    translation: &Translation,
    destination: &Destination,
    settings: &Settings,
    out: &mut W,
) -> Result<Vec<PathBuf>, EmitError> {
    match destination {
        Destination::DryRun(ReportFormat::Text) => {
            render_text_report(translation, settings, out)?;
            Ok(Vec::new())
        }
        Destination::DryRun(ReportFormat::Json) => {
            render_json_report(translation, settings, out)?;
            Ok(Vec::new())
        }
        Destination::Directory(dir) => {
            ensure_dir(dir)?;
            let wpa_dir = dir.join(WPA_SUBDIR);
            ensure_dir(&wpa_dir)?;
            write_all(translation, &dir.join(INTERFACES_FILE_NAME), &wpa_dir, out)
        }
        Destination::System => {
            if let Some(parent) = settings.interfaces_path.parent() {
                ensure_dir(parent)?;
            }
            ensure_dir(&settings.wpa_supplicant_dir)?;
            write_all(
                translation,
                &settings.interfaces_path,
                &settings.wpa_supplicant_dir,
                out,
            )
        }
    }
}

fn write_all<W: Write>(
    translation: &Translation,
    interfaces_path: &Path,
    wpa_dir: &Path,
    out: &mut W,
) -> Result<Vec<PathBuf>, EmitError> {
    let mut written = Vec::with_capacity(translation.wireless.len() + 1);

    writeln!(out, "Writing {}...", interfaces_path.display())?;
    write_file(interfaces_path, &translation.interfaces_text())?;
    written.push(interfaces_path.to_path_buf());

    for doc in &translation.wireless {
        let path = wpa_dir.join(Settings::wpa_file_name(&doc.interface));
        writeln!(out, "Writing {}...", path.display())?;
        // Holds the PSKs.
        write_private_file(&path, &doc.content)?;
        written.push(path);
    }

    Ok(written)
}

fn render_text_report<W: Write>(
    translation: &Translation,
    settings: &Settings,
    out: &mut W,
) -> io::Result<()> {
    section(out, &settings.interfaces_path, &translation.interfaces_text())?;
    for doc in &translation.wireless {
        section(out, &settings.wpa_conf_path(&doc.interface), &doc.content)?;
    }
    Ok(())
}

fn section<W: Write>(out: &mut W, path: &Path, content: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule.cyan())?;
    writeln!(out, "{}", format!("Generated {}:", path.display()).bold())?;
    writeln!(out, "{}", rule.cyan())?;
    writeln!(out, "{content}")?;
    writeln!(out)
}

fn render_json_report<W: Write>(
    translation: &Translation,
    settings: &Settings,
    out: &mut W,
) -> Result<(), EmitError> {
    let interfaces = translation.interfaces_text();
    let report = DryRunReport {
        interfaces: Artifact {
            path: settings.interfaces_path.display().to_string(),
            content: &interfaces,
        },
        wpa_supplicant: translation
            .wireless
            .iter()
            .map(|doc| WirelessArtifact {
                interface: &doc.interface,
                path: settings.wpa_conf_path(&doc.interface).display().to_string(),
                content: &doc.content,
            })
            .collect(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{check_privilege, emit, Destination, EmitError, ReportFormat};
    use crate::privilege::is_privileged;
    use crate::settings::Settings;
    use crate::translate::{Translation, WirelessDocument};

    fn sample() -> Translation {
        Translation {
            interface_lines: vec![
                "auto lo".to_string(),
                "iface lo inet loopback".to_string(),
                String::new(),
            ],
            wireless: vec![WirelessDocument {
                interface: "wlan0".to_string(),
                content: "update_config=1\n".to_string(),
            }],
            warnings: Vec::new(),
        }
    }

    fn run(destination: &Destination) -> (Result<Vec<std::path::PathBuf>, EmitError>, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let result = emit(&sample(), destination, &Settings::default(), &mut out);
        (result, String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn dry_run_text_prints_delimited_sections() {
        let (result, out) = run(&Destination::DryRun(ReportFormat::Text));
        assert!(result.expect("dry run").is_empty());

        let rule = "=".repeat(60);
        let expected = format!(
            "{rule}\nGenerated /etc/network/interfaces:\n{rule}\nauto lo\niface lo inet loopback\n\n\n\
             {rule}\nGenerated /etc/wpa_supplicant/wpa_supplicant-wlan0.conf:\n{rule}\nupdate_config=1\n\n\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn dry_run_json_is_machine_readable() {
        let (result, out) = run(&Destination::DryRun(ReportFormat::Json));
        result.expect("dry run");

        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed["interfaces"]["path"], "/etc/network/interfaces");
        assert_eq!(
            parsed["interfaces"]["content"],
            "auto lo\niface lo inet loopback\n"
        );
        assert_eq!(parsed["wpa_supplicant"][0]["interface"], "wlan0");
        assert_eq!(
            parsed["wpa_supplicant"][0]["path"],
            "/etc/wpa_supplicant/wpa_supplicant-wlan0.conf"
        );
    }

    #[test]
    fn directory_mode_writes_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("out");

        let (result, out) = run(&Destination::Directory(target.clone()));
        let written = result.expect("directory emit");

        assert_eq!(
            written,
            vec![
                target.join("interfaces"),
                target.join("wpa_supplicant").join("wpa_supplicant-wlan0.conf"),
            ]
        );
        assert_eq!(
            fs::read_to_string(target.join("interfaces")).expect("interfaces"),
            "auto lo\niface lo inet loopback\n"
        );
        assert!(out.contains("Writing "));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&written[1])
                .expect("metadata")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn only_system_mode_needs_root() {
        let settings = Settings::default();
        check_privilege(&Destination::DryRun(ReportFormat::Text), &settings).expect("dry run");
        check_privilege(&Destination::Directory("out".into()), &settings).expect("directory");

        let system = check_privilege(&Destination::System, &settings);
        if is_privileged() {
            system.expect("root may write system paths");
        } else {
            assert!(matches!(
                system,
                Err(EmitError::NotPrivileged { ref path }) if path == &settings.interfaces_path
            ));
        }
    }
}
