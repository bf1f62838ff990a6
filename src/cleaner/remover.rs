use crate::error::RemovalError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

pub trait Remover {
    fn remove(&self, path: &Path, recursive: bool) -> Result<(), RemovalError>;
    fn remove_elevated(&self, path: &Path) -> Result<(), RemovalError>;
}

/// Removes through the filesystem, or `sudo -n rm -rf` when elevated.
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&self, path: &Path, recursive: bool) -> Result<(), RemovalError> {
        let meta = fs::symlink_metadata(path).map_err(|e| RemovalError::io(path, e))?;

        let result = if meta.is_dir() {
            if recursive {
                fs::remove_dir_all(path)
            } else {
                fs::remove_dir(path)
            }
        } else {
            fs::remove_file(path)
        };

        result.map_err(|e| RemovalError::io(path, e))
    }

    fn remove_elevated(&self, path: &Path) -> Result<(), RemovalError> {
        let output = Command::new("sudo")
            .args(["-n", "rm", "-rf", "--"])
            .arg(path)
            .output()
            .map_err(|source| RemovalError::Spawn {
                program: "sudo",
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(RemovalError::Elevated {
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Whether privileged removal is available. Probed once per session and
/// reused for the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elevation {
    granted: bool,
}

impl Elevation {
    pub fn granted() -> Self {
        Self { granted: true }
    }

    pub fn none() -> Self {
        Self { granted: false }
    }

    /// Checks for cached sudo credentials without prompting.
    pub fn probe() -> Self {
        let granted = Command::new("sudo")
            .args(["-n", "true"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if granted {
            info!("elevated removal available");
        } else {
            debug!("no cached sudo credentials; system paths removed unprivileged");
        }
        Self { granted }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}
