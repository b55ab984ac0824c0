use crate::core::matcher::Matcher;
use crate::domain::models::{
    DeletionFailure, DeletionOutcome, KeyOutcome, MatchIndex, MatchedFile,
};
use anyhow::Context;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Counters for a single walk, reported once it finishes
#[derive(Debug, Default)]
struct ScanStats {
    scanned_count: usize,
    matched_count: usize,
    skipped_count: usize,
}

impl ScanStats {
    fn update(&mut self, matched: bool) {
        self.scanned_count += 1;
        if matched {
            self.matched_count += 1;
        }
    }

    fn skip(&mut self) {
        self.skipped_count += 1;
    }

    fn finish(&self, root: &Path) {
        info!(
            "Scan of {} complete: {} files scanned, {} matched, {} entries skipped",
            root.display(),
            self.scanned_count,
            self.matched_count,
            self.skipped_count
        );
    }
}

/// Canonicalizes `root`, failing if it is missing or not a directory.
pub fn resolve_root(root: &Path) -> anyhow::Result<PathBuf> {
    let resolved = fs::canonicalize(root)
        .with_context(|| format!("Directory does not exist: {}", root.display()))?;

    if !resolved.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    Ok(resolved)
}

/// Walks `root` and records every regular file the matcher accepts.
///
/// Entries that cannot be read are logged and skipped so one bad subtree
/// does not stop the rest of the walk.
pub fn scan_tree(root: &Path, matcher: &Matcher) -> anyhow::Result<MatchIndex> {
    let root = resolve_root(root)?;
    info!("Scanning for files in {}", root.display());
    debug!("Requested keys: {:?}", matcher.requested_keys());

    let mut index = MatchIndex::new();
    let mut stats = ScanStats::default();

    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                stats.skip();
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 file name: {}", entry.path().display());
            stats.skip();
            continue;
        };

        let matched = match matcher.classify(entry.path(), file_name) {
            Some((key, kind)) => {
                let file = MatchedFile {
                    name: file_name.to_string(),
                    path: entry.path().to_path_buf(),
                };
                let recorded = index.record(key, file, kind);
                if recorded {
                    debug!("Found {} under {}", entry.path().display(), key);
                }
                recorded
            }
            None => false,
        };
        stats.update(matched);
    }

    stats.finish(&root);
    Ok(index)
}

/// Removes every file in `index`. A failed removal is recorded and the
/// remaining files are still processed.
pub fn remove_matched_files(index: &MatchIndex) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for (key, files) in index.iter() {
        let mut key_outcome = KeyOutcome {
            key: key.to_string(),
            ..KeyOutcome::default()
        };

        for file in files {
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    debug!("Deleted {}", file.path.display());
                    key_outcome.deleted.push(file.path.clone());
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", file.path.display(), e);
                    key_outcome.failed.push(DeletionFailure {
                        path: file.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome.keys.push(key_outcome);
    }

    info!(
        "Deleted {} files, {} failures",
        outcome.deleted_count(),
        outcome.failed_count()
    );
    outcome
}
