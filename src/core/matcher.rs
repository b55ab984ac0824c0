use crate::domain::models::MatchKind;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Decides which bucket, if any, a file found during the walk belongs to.
#[derive(Debug, Clone)]
pub struct Matcher {
    names: Vec<String>,
    suffixes: Vec<String>,
    protected: Vec<String>,
    excluded_path: Option<PathBuf>,
}

impl Matcher {
    /// `self_path` is the running executable: its base name is dropped from
    /// `names` and the file itself is never matched.
    pub fn new(names: &[String], suffixes: &[String], self_path: Option<&Path>) -> Self {
        let self_name = self_path
            .and_then(Path::file_name)
            .and_then(|n| n.to_str());

        let mut kept = Vec::new();
        let mut protected = Vec::new();
        for name in names {
            if name.is_empty() || kept.contains(name) || protected.contains(name) {
                continue;
            }
            if Some(name.as_str()) == self_name {
                warn!("Refusing to match {}: it is this program's own file name", name);
                protected.push(name.clone());
                continue;
            }
            if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
                warn!("{} contains a path separator and can never match a file name", name);
            }
            kept.push(name.clone());
        }

        let mut normalized: Vec<String> = Vec::new();
        for suffix in suffixes.iter().filter_map(|s| normalize_suffix(s)) {
            if !normalized.contains(&suffix) {
                normalized.push(suffix);
            }
        }

        debug!("Name set: {:?}", kept);
        debug!("Suffix set: {:?}", normalized);

        Self {
            names: kept,
            suffixes: normalized,
            protected,
            excluded_path: self_path.map(Path::to_path_buf),
        }
    }

    /// Returns the matching key for a regular file, name rules first, then the
    /// first configured suffix that the base name ends with.
    pub fn classify(&self, path: &Path, file_name: &str) -> Option<(&str, MatchKind)> {
        if self.excluded_path.as_deref() == Some(path) {
            debug!("Skipping running executable at {}", path.display());
            return None;
        }

        if let Some(name) = self.names.iter().find(|n| n.as_str() == file_name) {
            return Some((name.as_str(), MatchKind::Name));
        }

        self.suffixes
            .iter()
            .find(|suffix| file_name.ends_with(suffix.as_str()))
            .map(|suffix| (suffix.as_str(), MatchKind::Suffix))
    }

    /// Every key the caller asked for, names before suffixes.
    pub fn requested_keys(&self) -> Vec<&str> {
        self.names
            .iter()
            .chain(self.suffixes.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn protected_names(&self) -> &[String] {
        &self.protected
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// Prepends `.` when missing; blank suffixes are dropped.
pub fn normalize_suffix(suffix: &str) -> Option<String> {
    let trimmed = suffix.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{}", trimmed))
    }
}

/// `<name><suffix>` for every name and suffix pair.
pub fn cross_names(names: &[String], suffixes: &[String]) -> Vec<String> {
    let suffixes: Vec<String> = suffixes.iter().filter_map(|s| normalize_suffix(s)).collect();
    names
        .iter()
        .flat_map(|name| suffixes.iter().map(move |suffix| format!("{}{}", name, suffix)))
        .collect()
}
