use crate::config::Config;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub path: PathBuf,
    pub size: u64,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, path: PathBuf, size: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            path,
            size,
        }
    }

    // path last: it may contain spaces
    pub fn to_log_line(&self) -> String {
        format!(
            "{} {} size={} {}\n",
            self.timestamp.to_rfc3339(),
            self.action,
            self.size,
            self.path.display()
        )
    }
}

/// Append-only record of everything removed.
pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Self {
        Self::at(Config::data_dir().join("history.log"))
    }

    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        write!(file, "{}", entry.to_log_line())?;
        Ok(())
    }

    pub fn log_removal(&self, action: &str, path: &Path, size: u64) -> Result<()> {
        self.log(&HistoryEntry::new(action, path.to_path_buf(), size))
    }

    /// Most recent first when `limit` is given.
    pub fn read_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)?;
        let entries: Vec<HistoryEntry> = content.lines().filter_map(parse_line).collect();

        let result = if let Some(n) = limit {
            entries.into_iter().rev().take(n).collect()
        } else {
            entries
        };

        Ok(result)
    }
}

impl Default for HistoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: &str) -> Option<HistoryEntry> {
    let mut parts = line.splitn(4, ' ');

    let timestamp = DateTime::parse_from_rfc3339(parts.next()?)
        .ok()?
        .with_timezone(&Utc);
    let action = parts.next()?.to_string();
    let size = parts.next()?.strip_prefix("size=")?.parse().ok()?;
    let path = PathBuf::from(parts.next()?);

    Some(HistoryEntry {
        timestamp,
        action,
        path,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_and_read_back_path_with_spaces() {
        let dir = tempdir().unwrap();
        let logger = HistoryLogger::at(dir.path().join("history.log"));

        logger
            .log_removal(
                "DELETE",
                Path::new("/Users/me/Library/Application Support/Old App"),
                4096,
            )
            .unwrap();
        logger
            .log_removal("PARTIAL", Path::new("/Users/me/Library/Containers/com.x"), 10)
            .unwrap();

        let entries = logger.read_history(None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].path,
            PathBuf::from("/Users/me/Library/Application Support/Old App")
        );
        assert_eq!(entries[0].size, 4096);
        assert_eq!(entries[1].action, "PARTIAL");
    }

    #[test]
    fn test_limit_returns_most_recent_first() {
        let dir = tempdir().unwrap();
        let logger = HistoryLogger::at(dir.path().join("nested/history.log"));
        for i in 0..5 {
            logger
                .log_removal("DELETE", Path::new(&format!("/tmp/item{i}")), i)
                .unwrap();
        }

        let entries = logger.read_history(Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("/tmp/item4"));
        assert_eq!(entries[1].path, PathBuf::from("/tmp/item3"));
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let logger = HistoryLogger::at(dir.path().join("none.log"));
        assert!(logger.read_history(Some(10)).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        assert!(parse_line("garbage").is_none());
        assert!(parse_line("2024-01-01T00:00:00+00:00 DELETE nosize /tmp/x").is_none());
    }
}
