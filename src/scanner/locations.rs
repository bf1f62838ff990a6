use crate::classifier::PREFERENCES_CATEGORY;
use crate::model::Confidence;
use std::path::{Path, PathBuf};

/// A directory whose immediate children may be app residue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualLocation {
    pub path: PathBuf,
    pub category: String,
    pub confidence_base: Confidence,
}

impl ResidualLocation {
    pub fn new(path: PathBuf, category: impl Into<String>, confidence_base: Confidence) -> Self {
        Self {
            path,
            category: category.into(),
            confidence_base,
        }
    }
}

pub fn default_locations(home: &Path) -> Vec<ResidualLocation> {
    let user = |rel: &str, category: &str, base: Confidence| {
        ResidualLocation::new(home.join(rel), category, base)
    };
    let system = |abs: &str, category: &str, base: Confidence| {
        ResidualLocation::new(PathBuf::from(abs), category, base)
    };

    vec![
        user(
            "Library/Application Support",
            "App Support",
            Confidence::Medium,
        ),
        user("Library/Caches", "Caches", Confidence::Medium),
        user("Library/Preferences", PREFERENCES_CATEGORY, Confidence::Medium),
        user("Library/Containers", "Containers", Confidence::High),
        user("Library/Group Containers", "Group Containers", Confidence::Medium),
        user("Library/Logs", "Logs", Confidence::High),
        user(
            "Library/Saved Application State",
            "Saved State",
            Confidence::High,
        ),
        user("Library/HTTPStorages", "HTTP Storages", Confidence::Medium),
        user("Library/WebKit", "WebKit", Confidence::Medium),
        user("Library/Cookies", "Cookies", Confidence::Low),
        user("Library/LaunchAgents", "Launch Agents", Confidence::Low),
        system(
            "/Library/Application Support",
            "System App Support",
            Confidence::Low,
        ),
        system("/Library/LaunchAgents", "System Launch Agents", Confidence::Low),
        system(
            "/Library/LaunchDaemons",
            "System Launch Daemons",
            Confidence::Low,
        ),
    ]
}
