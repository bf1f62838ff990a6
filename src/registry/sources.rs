use super::bundle::{is_app_bundle, AppBundle};
use crate::error::SourceError;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::warn;

/// One independent way of learning which applications are installed.
pub trait AppSource {
    fn name(&self) -> &'static str;
    fn list_installed(&self) -> Result<Vec<String>, SourceError>;
}

fn run_lines(program: &'static str, args: &[&str]) -> Result<Vec<String>, SourceError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| SourceError::Spawn { program, source })?;

    if !output.status.success() {
        return Err(SourceError::ExitStatus {
            program,
            code: output.status.code(),
        });
    }

    Ok(parse_lines(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn bundle_identifiers(paths: impl IntoIterator<Item = PathBuf>) -> Vec<String> {
    paths
        .into_iter()
        .filter(|p| is_app_bundle(p))
        .flat_map(|p| AppBundle::load(p).identifiers())
        .collect()
}

/// Application bundles known to the Spotlight index.
pub struct SpotlightSource;

impl AppSource for SpotlightSource {
    fn name(&self) -> &'static str {
        "spotlight"
    }

    fn list_installed(&self) -> Result<Vec<String>, SourceError> {
        let lines = run_lines(
            "mdfind",
            &["kMDItemContentType == 'com.apple.application-bundle'"],
        )?;
        Ok(bundle_identifiers(lines.into_iter().map(PathBuf::from)))
    }
}

/// Casks installed through Homebrew.
pub struct CaskSource;

impl AppSource for CaskSource {
    fn name(&self) -> &'static str {
        "brew-cask"
    }

    fn list_installed(&self) -> Result<Vec<String>, SourceError> {
        run_lines("brew", &["list", "--cask"])
    }
}

/// Package identifiers from the installer receipt database.
pub struct ReceiptSource;

impl AppSource for ReceiptSource {
    fn name(&self) -> &'static str {
        "pkgutil"
    }

    fn list_installed(&self) -> Result<Vec<String>, SourceError> {
        run_lines("pkgutil", &["--pkgs"])
    }
}

/// `.app` bundles sitting directly in the application folders. Covers
/// machines where Spotlight indexing is disabled.
pub struct ApplicationsDirSource {
    search_paths: Vec<PathBuf>,
}

impl ApplicationsDirSource {
    pub fn new(home: &std::path::Path) -> Self {
        Self {
            search_paths: vec![PathBuf::from("/Applications"), home.join("Applications")],
        }
    }

    pub fn with_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }
}

impl AppSource for ApplicationsDirSource {
    fn name(&self) -> &'static str {
        "applications-dir"
    }

    fn list_installed(&self) -> Result<Vec<String>, SourceError> {
        let mut paths = Vec::new();

        for dir in &self.search_paths {
            if !dir.exists() {
                continue;
            }
            match fs::read_dir(dir) {
                Ok(entries) => paths.extend(entries.flatten().map(|e| e.path())),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "application folder not listable");
                }
            }
        }

        Ok(bundle_identifiers(paths))
    }
}
