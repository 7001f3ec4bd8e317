use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Mode applied to files that carry secrets (owner read/write only).
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Errors that can occur while writing generated configuration files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The filesystem refused access to `path`.
    #[error("permission denied writing {}", path.display())]
    PermissionDenied { path: PathBuf },
    /// Failed to create an output directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    /// Any other I/O failure while writing `path`.
    #[error("failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl WriteError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            WriteError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            WriteError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Create `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(path).map_err(|source| {
        if source.kind() == io::ErrorKind::PermissionDenied {
            WriteError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            WriteError::CreateDir {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Write `contents` to `path` with the process' default permissions.
pub fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    fs::write(path, contents).map_err(|source| WriteError::from_io(path, source))
}

/// Write `contents` to `path` readable and writable by the owner only.
///
/// The file is created with [`PRIVATE_FILE_MODE`] and an existing file is
/// re-chmodded, so the secret never sits under a wider umask.
pub fn write_private_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    write_private(path, contents).map_err(|source| WriteError::from_io(path, source))
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(PRIVATE_FILE_MODE)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
