use crate::model::{Confidence, EntryKind, OrphanFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub installed_app_count: usize,
    pub items: Vec<ScanItem>,
    pub total_size_bytes: u64,
    pub total_item_count: usize,
    pub scan_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanItem {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
    pub app_name: String,
    pub reason: String,
    pub confidence: Confidence,
    pub category: String,
}

impl From<&OrphanFile> for ScanItem {
    fn from(orphan: &OrphanFile) -> Self {
        Self {
            path: orphan.path.clone(),
            kind: orphan.kind,
            size_bytes: orphan.size,
            app_name: orphan.app_name.clone(),
            reason: orphan.reason.clone(),
            confidence: orphan.confidence,
            category: orphan.category.clone(),
        }
    }
}

impl ScanResult {
    pub fn new(items: Vec<ScanItem>, installed_app_count: usize, scan_duration_ms: u64) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
            installed_app_count,
            total_size_bytes: items.iter().map(|i| i.size_bytes).sum(),
            total_item_count: items.len(),
            items,
            scan_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_field_names() {
        let orphan = OrphanFile {
            path: PathBuf::from("/Users/me/Library/Logs/OldApp"),
            kind: EntryKind::Directory,
            size: 3000,
            app_name: "OldApp".into(),
            reason: "No matching installed application".into(),
            confidence: Confidence::High,
            category: "Logs".into(),
        };
        let result = ScanResult::new(vec![ScanItem::from(&orphan), ScanItem::from(&orphan)], 7, 12);

        assert_eq!(result.total_size_bytes, 6000);
        assert_eq!(result.total_item_count, 2);

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["items"][0]["confidence"], "high");
        assert_eq!(json["items"][0]["kind"], "directory");
        assert_eq!(json["installed_app_count"], 7);
    }
}
