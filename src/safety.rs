use std::path::{Path, PathBuf};

/// How a path has to be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Inside a sandbox container root; the OS may refuse to drop the shell.
    ProtectedContainer,
    /// Outside the user's home directory.
    System,
    Ordinary,
}

pub struct SafetyChecker {
    home: PathBuf,
    container_roots: Vec<PathBuf>,
    protected_paths: Vec<&'static str>,
    critical_patterns: Vec<&'static str>,
}

impl SafetyChecker {
    pub fn new(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            container_roots: vec![
                home.join("Library/Containers"),
                home.join("Library/Group Containers"),
            ],
            protected_paths: vec![
                "/System",
                "/usr",
                "/bin",
                "/sbin",
                "/etc",
                "/var/db",
                "/private/var/db",
            ],
            critical_patterns: vec![
                "Library/Keychains",
                "Library/Security",
                "Library/CoreServices",
            ],
        }
    }

    pub fn classify(&self, path: &Path) -> PathClass {
        let in_container = self
            .container_roots
            .iter()
            .any(|root| path.starts_with(root) && path != root.as_path());

        if in_container {
            PathClass::ProtectedContainer
        } else if !path.starts_with(&self.home) {
            PathClass::System
        } else {
            PathClass::Ordinary
        }
    }

    /// False for OS-owned trees that are never touched.
    pub fn is_safe_to_delete(&self, path: &Path) -> bool {
        if path.parent().is_none() || path == self.home {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self
            .protected_paths
            .iter()
            .any(|protected| path.starts_with(protected))
        {
            return false;
        }

        !self
            .critical_patterns
            .iter()
            .any(|pattern| path_str.contains(pattern))
    }
}
