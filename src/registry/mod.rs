//! Set of applications currently installed, merged from independent sources.

pub mod bundle;
pub mod sources;

pub use sources::{AppSource, ApplicationsDirSource, CaskSource, ReceiptSource, SpotlightSource};

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Lowercase application identifiers. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct InstalledAppSet {
    names: HashSet<String>,
}

impl InstalledAppSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for InstalledAppSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

pub struct InstalledAppRegistry {
    sources: Vec<Box<dyn AppSource>>,
}

impl InstalledAppRegistry {
    pub fn new(sources: Vec<Box<dyn AppSource>>) -> Self {
        Self { sources }
    }

    pub fn system(home: &Path) -> Self {
        Self::new(vec![
            Box::new(SpotlightSource),
            Box::new(CaskSource),
            Box::new(ReceiptSource),
            Box::new(ApplicationsDirSource::new(home)),
        ])
    }

    /// Unions every source. A failing source contributes nothing.
    pub fn build(&self) -> InstalledAppSet {
        let mut names = Vec::new();

        for source in &self.sources {
            match source.list_installed() {
                Ok(found) => {
                    debug!(source = source.name(), count = found.len(), "app source listed");
                    names.extend(found);
                }
                Err(e) => {
                    debug!(source = source.name(), error = %e, "app source unavailable");
                }
            }
        }

        let set: InstalledAppSet = names.into_iter().collect();
        info!(installed = set.len(), "installed application set built");
        set
    }
}
