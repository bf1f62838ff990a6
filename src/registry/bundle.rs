use anyhow::Result;
use plist::Value;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// An installed `.app` bundle and the identifiers it answers to.
#[derive(Debug, Clone)]
pub struct AppBundle {
    pub path: PathBuf,
    pub bundle_id: Option<String>,
}

impl AppBundle {
    pub fn load(path: PathBuf) -> Self {
        let bundle_id = read_bundle_id(&path).ok().flatten();
        Self { path, bundle_id }
    }

    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
    }

    /// Stem plus bundle identifier, the forms leftovers are usually named by.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids = vec![self.name().to_string()];
        if let Some(id) = &self.bundle_id {
            ids.push(id.clone());
        }
        ids
    }
}

fn read_bundle_id(path: &Path) -> Result<Option<String>> {
    let content = fs::read(path.join("Contents/Info.plist"))?;
    let plist = Value::from_reader(Cursor::new(content))?;

    Ok(plist
        .as_dictionary()
        .and_then(|d| d.get("CFBundleIdentifier"))
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

pub fn is_app_bundle(path: &Path) -> bool {
    path.extension().map(|e| e == "app").unwrap_or(false)
}
