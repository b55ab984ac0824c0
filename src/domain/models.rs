use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone)]
pub struct RemoveConfig {
    pub root_path: PathBuf,
    pub mode: RemoveMode,
    /// Canonical path of the running executable, never deleted.
    pub self_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveMode {
    /// Delete every file with one of these base names, no confirmation.
    Names(Vec<String>),
    /// List files ending in one of these suffixes and delete the confirmed ones.
    Suffixes(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Name,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub name: String,
    pub path: PathBuf,
}

/// Files found during a walk, grouped by the key that matched them.
///
/// Buckets keep first-discovery order and each bucket keeps traversal order.
#[derive(Debug, Default)]
pub struct MatchIndex {
    buckets: Vec<(String, Vec<MatchedFile>)>,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `file` under `key`. Suffix buckets hold each base name once;
    /// returns false when the file was dropped as a duplicate.
    pub fn record(&mut self, key: &str, file: MatchedFile, kind: MatchKind) -> bool {
        let position = match self.buckets.iter().position(|(k, _)| k == key) {
            Some(position) => position,
            None => {
                self.buckets.push((key.to_string(), Vec::new()));
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[position].1;
        if kind == MatchKind::Suffix && bucket.iter().any(|f| f.name == file.name) {
            return false;
        }
        bucket.push(file);
        true
    }

    pub fn get(&self, key: &str) -> Option<&[MatchedFile]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, files)| files.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchedFile])> {
        self.buckets
            .iter()
            .map(|(key, files)| (key.as_str(), files.as_slice()))
    }

    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(|(_, files)| files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }

    /// Flattened base names, in bucket order, for the confirmation listing.
    pub fn candidates(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (_, files) in &self.buckets {
            for file in files {
                if !names.contains(&file.name) {
                    names.push(file.name.clone());
                }
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub key: String,
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<DeletionFailure>,
}

#[derive(Debug, Default)]
pub struct DeletionOutcome {
    pub keys: Vec<KeyOutcome>,
}

impl DeletionOutcome {
    pub fn deleted_count(&self) -> usize {
        self.keys.iter().map(|k| k.deleted.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.keys.iter().map(|k| k.failed.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The confirmation input was malformed and nothing was deleted.
    Rejected,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunOutcome::Completed => ExitCode::SUCCESS,
            RunOutcome::Rejected => ExitCode::from(2),
        }
    }
}
