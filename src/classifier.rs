//! Decides whether a directory entry is residue of an uninstalled app.

use crate::model::Confidence;
use crate::registry::InstalledAppSet;
use crate::scanner::ResidualLocation;
use crate::utils::{KIB, MIB};

pub const MIN_REPORT_SIZE: u64 = KIB;
pub const HIGH_CONFIDENCE_SIZE: u64 = 100 * MIB;
pub const LOW_PREFERENCES_SIZE: u64 = 10 * KIB;

pub const PREFERENCES_CATEGORY: &str = "Preferences";

const SYSTEM_PREFIXES: &[&str] = &[
    "com.apple",
    "group.com.apple",
    "apple",
    "cloudkit",
    "clouddocs",
    "icloud",
    "mobile documents",
    "addressbook",
    "callhistory",
    "knowledge",
    "familycircle",
    "geoservices",
    "crashreporter",
    "diagnosticreports",
    "syncservices",
    "fileprovider",
    "mobilesync",
    "networkserviceproxy",
    "spotlight",
    "metadata",
    "keychains",
    "systemmigration",
];

const BUNDLE_NAMES: &[(&str, &str)] = &[
    ("com.google.chrome", "Google Chrome"),
    ("com.google.drivefs", "Google Drive"),
    ("com.microsoft.vscode", "Visual Studio Code"),
    ("com.microsoft.teams", "Microsoft Teams"),
    ("com.microsoft.word", "Microsoft Word"),
    ("com.microsoft.excel", "Microsoft Excel"),
    ("com.microsoft.powerpoint", "Microsoft PowerPoint"),
    ("com.microsoft.outlook", "Microsoft Outlook"),
    ("com.spotify.client", "Spotify"),
    ("com.tinyspeck.slackmacgap", "Slack"),
    ("com.hnc.discord", "Discord"),
    ("us.zoom.xos", "zoom.us"),
    ("org.mozilla.firefox", "Firefox"),
    ("com.brave.browser", "Brave Browser"),
    ("com.operasoftware.opera", "Opera"),
    ("com.docker.docker", "Docker"),
    ("com.figma.desktop", "Figma"),
    ("notion.id", "Notion"),
    ("com.jetbrains.intellij", "IntelliJ IDEA"),
    ("com.jetbrains.pycharm", "PyCharm"),
    ("com.getdropbox.dropbox", "Dropbox"),
    ("com.skype.skype", "Skype"),
    ("com.postmanlabs.mac", "Postman"),
    ("com.github.githubclient", "GitHub Desktop"),
    ("org.videolan.vlc", "VLC"),
    ("com.adobe.acrobat", "Adobe Acrobat"),
];

/// File suffixes stripped before a name is split into dot segments.
const FILE_SUFFIXES: &[&str] = &[".plist", ".savedstate", ".binarycookies"];

/// Immutable lookup tables consulted by the classifier.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub system_prefixes: Vec<String>,
    pub bundle_names: Vec<(String, String)>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            system_prefixes: SYSTEM_PREFIXES.iter().map(|s| s.to_string()).collect(),
            bundle_names: BUNDLE_NAMES
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameVerdict {
    Keep,
    Orphan { app_name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Keep,
    TooSmall,
    Orphan {
        app_name: String,
        reason: String,
        confidence: Confidence,
    },
}

pub struct OrphanClassifier<'a> {
    installed: &'a InstalledAppSet,
    rules: &'a ClassifierRules,
}

impl<'a> OrphanClassifier<'a> {
    pub fn new(installed: &'a InstalledAppSet, rules: &'a ClassifierRules) -> Self {
        Self { installed, rules }
    }

    pub fn classify(&self, name: &str, location: &ResidualLocation, size: u64) -> Classification {
        match self.evaluate_name(name) {
            NameVerdict::Keep => Classification::Keep,
            NameVerdict::Orphan { app_name, reason } => {
                match confidence_for(location, size) {
                    Some(confidence) => Classification::Orphan {
                        app_name,
                        reason,
                        confidence,
                    },
                    None => Classification::TooSmall,
                }
            }
        }
    }

    /// Size-independent half of the decision, so kept entries are never
    /// measured.
    pub fn evaluate_name(&self, name: &str) -> NameVerdict {
        if self.is_system(name) {
            return NameVerdict::Keep;
        }

        let stem = strip_file_suffix(name);
        let candidate = self.candidate_name(stem);

        if is_uuid(stem) {
            return NameVerdict::Orphan {
                app_name: candidate,
                reason: "UUID-named leftover data folder".to_string(),
            };
        }

        if self.installed.contains(name)
            || self.installed.contains(stem)
            || self.installed.contains(&candidate)
        {
            return NameVerdict::Keep;
        }

        if let Some((_, last)) = stem.rsplit_once('.') {
            if last.chars().count() >= 3 && self.installed.contains(last) {
                return NameVerdict::Keep;
            }
        }

        NameVerdict::Orphan {
            app_name: candidate,
            reason: "No matching installed application".to_string(),
        }
    }

    fn is_system(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.rules
            .system_prefixes
            .iter()
            .any(|p| lower.starts_with(p.as_str()))
    }

    fn candidate_name(&self, stem: &str) -> String {
        let lower = stem.to_lowercase();
        if let Some((_, display)) = self
            .rules
            .bundle_names
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix.as_str()))
        {
            return display.clone();
        }

        let segments: Vec<&str> = stem.split('.').collect();
        if segments.len() >= 3 {
            if let Some(last) = segments.last().filter(|s| !s.is_empty()) {
                return last.to_string();
            }
        }

        stem.to_string()
    }
}

/// `None` when the entry is too small to report.
pub fn confidence_for(location: &ResidualLocation, size: u64) -> Option<Confidence> {
    if size < MIN_REPORT_SIZE {
        return None;
    }

    if size > HIGH_CONFIDENCE_SIZE {
        return Some(Confidence::High);
    }

    if location.category == PREFERENCES_CATEGORY && size < LOW_PREFERENCES_SIZE {
        return Some(Confidence::Low);
    }

    Some(location.confidence_base)
}

fn strip_file_suffix(name: &str) -> &str {
    for suffix in FILE_SUFFIXES {
        let Some(cut) = name.len().checked_sub(suffix.len()) else {
            continue;
        };
        if cut > 0 && name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(suffix) {
            return &name[..cut];
        }
    }
    name
}

/// 8-4-4-4-12 hex groups.
pub fn is_uuid(name: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let parts: Vec<&str> = name.split('-').collect();
    parts.len() == GROUPS.len()
        && parts
            .iter()
            .zip(GROUPS)
            .all(|(part, len)| part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit()))
}
