pub mod disk;
pub mod locations;

pub use disk::{BlockUsage, DiskUsage, DuCommand};
pub use locations::{default_locations, ResidualLocation};

use crate::classifier::{confidence_for, ClassifierRules, NameVerdict, OrphanClassifier};
use crate::config::ScanConfig;
use crate::model::{EntryKind, OrphanFile};
use crate::registry::{InstalledAppRegistry, InstalledAppSet};
use glob::Pattern;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default locations plus the configured extras.
pub fn configured_locations(config: &ScanConfig, home: &Path) -> Vec<ResidualLocation> {
    let mut locations = default_locations(home);
    locations.extend(config.extra_residual_locations(home));
    locations
}

/// Registry, classifier and scanner wired from configuration.
/// `on_registry` runs once the installed set is known, `progress` before
/// each location.
pub fn scan_residue(
    config: &ScanConfig,
    home: &Path,
    registry: &InstalledAppRegistry,
    on_registry: impl FnOnce(&InstalledAppSet),
    progress: impl Fn(&ResidualLocation),
) -> Vec<OrphanFile> {
    let installed = registry.build();
    on_registry(&installed);

    let rules = ClassifierRules::default();
    let classifier = OrphanClassifier::new(&installed, &rules);
    let locations = configured_locations(config, home);
    let disk = config.size_backend.provider();

    // the scanner owns a boxed callback, so it must drop before the locals it borrows
    let orphans = ResidueScanner::new(&locations, &classifier, disk.as_ref())
        .with_excluded(config.excluded_patterns(home))
        .with_progress(progress)
        .scan();
    orphans
}

/// Walks the residual locations one after another and collects orphans,
/// largest first.
pub struct ResidueScanner<'a> {
    locations: &'a [ResidualLocation],
    classifier: &'a OrphanClassifier<'a>,
    disk: &'a dyn DiskUsage,
    excluded: Vec<Pattern>,
    progress_callback: Option<Box<dyn Fn(&ResidualLocation) + 'a>>,
}

impl<'a> ResidueScanner<'a> {
    pub fn new(
        locations: &'a [ResidualLocation],
        classifier: &'a OrphanClassifier<'a>,
        disk: &'a dyn DiskUsage,
    ) -> Self {
        Self {
            locations,
            classifier,
            disk,
            excluded: Vec::new(),
            progress_callback: None,
        }
    }

    pub fn with_excluded(mut self, excluded: Vec<Pattern>) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn with_progress(mut self, cb: impl Fn(&ResidualLocation) + 'a) -> Self {
        self.progress_callback = Some(Box::new(cb));
        self
    }

    pub fn scan(&self) -> Vec<OrphanFile> {
        let mut orphans = Vec::new();

        for location in self.locations {
            if let Some(cb) = &self.progress_callback {
                cb(location);
            }
            let found = self.scan_location(location);
            debug!(
                location = %location.path.display(),
                found = found.len(),
                "location scanned"
            );
            orphans.extend(found);
        }

        // stable: equal sizes keep encounter order
        orphans.sort_by(|a, b| b.size.cmp(&a.size));

        info!(orphans = orphans.len(), "residue scan complete");
        orphans
    }

    fn scan_location(&self, location: &ResidualLocation) -> Vec<OrphanFile> {
        let entries = match fs::read_dir(&location.path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(location = %location.path.display(), error = %e, "location not listable");
                return Vec::new();
            }
        };

        let mut children: Vec<_> = entries.flatten().collect();
        children.sort_by_key(|e| e.file_name());

        let mut orphans = Vec::new();

        for entry in children {
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();

            if name.starts_with('.') || self.is_excluded(&path) {
                continue;
            }

            let (app_name, reason) = match self.classifier.evaluate_name(&name) {
                NameVerdict::Keep => continue,
                NameVerdict::Orphan { app_name, reason } => (app_name, reason),
            };

            let size = self.disk.measure(&path);
            let Some(confidence) = confidence_for(location, size) else {
                continue;
            };

            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Directory,
                _ => EntryKind::File,
            };

            orphans.push(OrphanFile {
                path,
                kind,
                size,
                app_name,
                reason,
                confidence,
                category: location.category.clone(),
            });
        }

        orphans
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|p| p.matches_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierRules;
    use crate::config::ExtraLocation;
    use crate::error::SourceError;
    use crate::model::Confidence;
    use crate::registry::{AppSource, InstalledAppSet};
    use crate::utils::MIB;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Sizes keyed by file name; unknown names measure as 0.
    struct FixedUsage(HashMap<String, u64>);

    impl FixedUsage {
        fn new(sizes: &[(&str, u64)]) -> Self {
            Self(sizes.iter().map(|(n, s)| (n.to_string(), *s)).collect())
        }
    }

    impl DiskUsage for FixedUsage {
        fn measure(&self, path: &Path) -> u64 {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.0.get(&name).copied().unwrap_or(0)
        }
    }

    fn make_dirs(root: &Path, names: &[&str]) {
        for name in names {
            fs::create_dir_all(root.join(name)).unwrap();
        }
    }

    #[test]
    fn test_end_to_end_old_app() {
        let support = tempdir().unwrap();
        let caches = tempdir().unwrap();
        make_dirs(support.path(), &["OldApp"]);
        make_dirs(caches.path(), &["com.apple.foo"]);

        let locations = vec![
            ResidualLocation::new(support.path().to_path_buf(), "App Support", Confidence::Medium),
            ResidualLocation::new(caches.path().to_path_buf(), "Caches", Confidence::Medium),
        ];
        let installed: InstalledAppSet = ["safari", "chrome"].iter().collect();
        let rules = ClassifierRules::default();
        let classifier = OrphanClassifier::new(&installed, &rules);
        let disk = FixedUsage::new(&[("OldApp", 150 * MIB), ("com.apple.foo", MIB)]);

        let orphans = ResidueScanner::new(&locations, &classifier, &disk).scan();

        assert_eq!(orphans.len(), 1);
        let orphan = &orphans[0];
        assert_eq!(orphan.name(), "OldApp");
        assert_eq!(orphan.confidence, Confidence::High);
        assert_eq!(orphan.size, 150 * MIB);
        assert_eq!(orphan.kind, EntryKind::Directory);
        assert_eq!(orphan.category, "App Support");
    }

    #[test]
    fn test_hidden_kept_and_tiny_entries_skipped() {
        let root = tempdir().unwrap();
        make_dirs(root.path(), &[".hidden", "Slack", "Tiny", "Gone"]);
        fs::write(root.path().join("stray.log"), b"x").unwrap();

        let locations = vec![ResidualLocation::new(
            root.path().to_path_buf(),
            "Logs",
            Confidence::High,
        )];
        let installed: InstalledAppSet = ["slack"].iter().collect();
        let rules = ClassifierRules::default();
        let classifier = OrphanClassifier::new(&installed, &rules);
        let disk = FixedUsage::new(&[
            (".hidden", 10 * MIB),
            ("Slack", 10 * MIB),
            ("Tiny", 512),
            ("Gone", 4096),
            ("stray.log", 2048),
        ]);

        let orphans = ResidueScanner::new(&locations, &classifier, &disk).scan();
        let names: Vec<String> = orphans.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["Gone".to_string(), "stray.log".to_string()]);
        assert_eq!(orphans[1].kind, EntryKind::File);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        make_dirs(first.path(), &["Alpha", "Beta"]);
        make_dirs(second.path(), &["Gamma", "Delta"]);

        let locations = vec![
            ResidualLocation::new(first.path().to_path_buf(), "Caches", Confidence::Medium),
            ResidualLocation::new(second.path().to_path_buf(), "Logs", Confidence::High),
        ];
        let installed = InstalledAppSet::default();
        let rules = ClassifierRules::default();
        let classifier = OrphanClassifier::new(&installed, &rules);
        let disk = FixedUsage::new(&[
            ("Alpha", 4096),
            ("Beta", 8192),
            ("Gamma", 4096),
            ("Delta", 4096),
        ]);

        let scanner = ResidueScanner::new(&locations, &classifier, &disk);
        let first_pass: Vec<String> = scanner.scan().iter().map(|o| o.name()).collect();
        assert_eq!(first_pass, vec!["Beta", "Alpha", "Delta", "Gamma"]);

        let second_pass: Vec<String> = scanner.scan().iter().map(|o| o.name()).collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_unlistable_location_does_not_abort() {
        let root = tempdir().unwrap();
        make_dirs(root.path(), &["OldApp"]);

        let locations = vec![
            ResidualLocation::new(
                PathBuf::from("/nonexistent/leftovers-test-location"),
                "Caches",
                Confidence::Medium,
            ),
            ResidualLocation::new(root.path().to_path_buf(), "Caches", Confidence::Medium),
        ];
        let installed = InstalledAppSet::default();
        let rules = ClassifierRules::default();
        let classifier = OrphanClassifier::new(&installed, &rules);
        let disk = FixedUsage::new(&[("OldApp", 2 * MIB)]);

        let orphans = ResidueScanner::new(&locations, &classifier, &disk).scan();
        assert_eq!(orphans.len(), 1);
    }

    #[test]
    fn test_excluded_patterns_and_progress() {
        let root = tempdir().unwrap();
        make_dirs(root.path(), &["Keep Me", "OldApp"]);

        let locations = vec![ResidualLocation::new(
            root.path().to_path_buf(),
            "Caches",
            Confidence::Medium,
        )];
        let installed = InstalledAppSet::default();
        let rules = ClassifierRules::default();
        let classifier = OrphanClassifier::new(&installed, &rules);
        let disk = FixedUsage::new(&[("Keep Me", MIB), ("OldApp", MIB)]);
        let pattern = Pattern::new(&format!("{}/Keep*", root.path().display())).unwrap();

        let seen = std::cell::Cell::new(0);
        let orphans = ResidueScanner::new(&locations, &classifier, &disk)
            .with_excluded(vec![pattern])
            .with_progress(|_| seen.set(seen.get() + 1))
            .scan();

        assert_eq!(seen.get(), 1);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].name(), "OldApp");
    }

    struct StaticSource(Vec<&'static str>);

    impl AppSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        fn list_installed(&self) -> Result<Vec<String>, SourceError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn write_entry(dir: &Path, name: &str) {
        let entry = dir.join(name);
        fs::create_dir_all(&entry).unwrap();
        fs::write(entry.join("data.bin"), vec![7u8; 64 * 1024]).unwrap();
    }

    #[test]
    fn test_scan_residue_uses_configured_locations_and_exclusions() {
        let home = tempdir().unwrap();
        let caches = home.path().join("Library/Caches");
        let scripts = home.path().join("Scripts");
        write_entry(&caches, "OldApp");
        write_entry(&caches, "Slack");
        write_entry(&caches, "KeepMe");
        write_entry(&scripts, "RetiredTool");

        let mut config = ScanConfig::default();
        config.excluded_paths.push("~/Library/Caches/Keep*".into());
        config.extra_locations.push(ExtraLocation {
            path: "~/Scripts".into(),
            category: "Scripts".into(),
            confidence: Confidence::Low,
        });

        let registry = InstalledAppRegistry::new(vec![Box::new(StaticSource(vec!["Slack"]))]);
        let installed_count = std::cell::Cell::new(0);
        let visited = std::cell::RefCell::new(Vec::new());

        let orphans = scan_residue(
            &config,
            home.path(),
            &registry,
            |installed| installed_count.set(installed.len()),
            |location| visited.borrow_mut().push(location.category.clone()),
        );

        assert_eq!(installed_count.get(), 1);
        assert_eq!(
            visited.borrow().len(),
            configured_locations(&config, home.path()).len()
        );
        assert_eq!(visited.borrow().last().map(String::as_str), Some("Scripts"));

        // system-wide locations may hold real entries on the host
        let mut found: Vec<(String, Confidence)> = orphans
            .iter()
            .filter(|o| o.path.starts_with(home.path()))
            .map(|o| (o.name(), o.confidence))
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                ("OldApp".to_string(), Confidence::Medium),
                ("RetiredTool".to_string(), Confidence::Low),
            ]
        );
    }
}
