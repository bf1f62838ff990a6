use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A filesystem entry believed to belong to an application that is no
/// longer installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanFile {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub app_name: String,
    pub reason: String,
    pub confidence: Confidence,
    pub category: String,
}

impl OrphanFile {
    pub fn name(&self) -> String {
        crate::utils::file_name_lossy(&self.path)
    }
}

/// Uniform row shape for the review list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub detail: Option<String>,
    pub confidence: Option<Confidence>,
    pub category: Option<String>,
}

impl SelectableItem {
    pub fn new(name: impl Into<String>, path: PathBuf, size: u64) -> Self {
        Self {
            name: name.into(),
            path,
            size,
            detail: None,
            confidence: None,
            category: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl From<&OrphanFile> for SelectableItem {
    fn from(orphan: &OrphanFile) -> Self {
        SelectableItem::new(orphan.name(), orphan.path.clone(), orphan.size)
            .with_detail(format!("{} ({})", orphan.app_name, orphan.reason))
            .with_confidence(orphan.confidence)
            .with_category(orphan.category.clone())
    }
}
