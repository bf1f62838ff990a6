use std::fs::Metadata;
use std::path::Path;
use std::process::Command;
use tracing::debug;
use walkdir::WalkDir;

/// Allocated size of a file or directory tree. Failures measure as 0.
pub trait DiskUsage {
    fn measure(&self, path: &Path) -> u64;
}

/// Sums allocated blocks while walking the tree, like `du`. Symlinks are
/// counted as themselves, never as their target, including at the root.
pub struct BlockUsage;

impl DiskUsage for BlockUsage {
    fn measure(&self, path: &Path) -> u64 {
        WalkDir::new(path)
            .follow_links(false)
            .follow_root_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.metadata().ok())
            .map(|m| allocated_bytes(&m))
            .sum()
    }
}

#[cfg(unix)]
fn allocated_bytes(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks() * 512
}

#[cfg(not(unix))]
fn allocated_bytes(meta: &Metadata) -> u64 {
    if meta.is_file() {
        meta.len()
    } else {
        0
    }
}

/// Shells out to `du -sk`.
pub struct DuCommand;

impl DiskUsage for DuCommand {
    fn measure(&self, path: &Path) -> u64 {
        let output = match Command::new("du").arg("-sk").arg(path).output() {
            Ok(o) => o,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "du failed to start");
                return 0;
            }
        };

        // du still prints a total when some children are unreadable
        parse_du_kib(&String::from_utf8_lossy(&output.stdout))
            .map(|kib| kib * 1024)
            .unwrap_or(0)
    }
}

fn parse_du_kib(stdout: &str) -> Option<u64> {
    stdout.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_du_output() {
        assert_eq!(parse_du_kib("2048\t/Users/me/Library/Caches/Foo\n"), Some(2048));
        assert_eq!(parse_du_kib(""), None);
        assert_eq!(parse_du_kib("du: cannot access"), None);
    }

    #[test]
    fn test_block_usage_counts_nested_files() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("data.bin"), vec![1u8; 64 * 1024]).unwrap();

        let size = BlockUsage.measure(dir.path());
        assert!(size >= 64 * 1024);
    }

    #[test]
    fn test_missing_path_measures_zero() {
        let size = BlockUsage.measure(Path::new("/nonexistent/leftovers-test-path-4815"));
        assert_eq!(size, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_entry_is_not_measured_as_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("blob.bin"), vec![1u8; 4 * 1024 * 1024]).unwrap();

        let link = dir.path().join("OldApp");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(BlockUsage.measure(&link) < 64 * 1024);
    }
}
