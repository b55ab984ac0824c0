use crate::domain::models::DeletionOutcome;
use log::debug;
use std::fmt;
use std::path::PathBuf;

pub const SEPARATOR: &str = "==========";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Protected(String),
    Heading(String),
    Deleted(PathBuf),
    Failed { path: PathBuf, reason: String },
    Separator,
    NotFound(String),
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Protected(name) => write!(
                f,
                "Skipping {}: refusing to delete this program's own file",
                name
            ),
            ReportLine::Heading(key) => write!(f, "{} file paths:", key),
            ReportLine::Deleted(path) => write!(f, "{}", path.display()),
            ReportLine::Failed { path, reason } => {
                write!(f, "Failed to delete {}: {}", path.display(), reason)
            }
            ReportLine::Separator => f.write_str(SEPARATOR),
            ReportLine::NotFound(key) => write!(f, "No file matching {} found", key),
        }
    }
}

/// Lines for every requested key that matched nothing, in request order.
pub fn not_found_lines<'a>(
    requested: impl IntoIterator<Item = &'a str>,
    is_matched: impl Fn(&str) -> bool,
) -> Vec<ReportLine> {
    requested
        .into_iter()
        .filter(|key| !is_matched(key))
        .map(|key| ReportLine::NotFound(key.to_string()))
        .collect()
}

/// Matched keys with their paths, then a separator, then the keys that
/// matched nothing. The separator only appears when both groups are present.
pub fn build_report(
    requested: &[&str],
    protected: &[String],
    outcome: &DeletionOutcome,
) -> Vec<ReportLine> {
    debug!("Building report for {} requested keys", requested.len());
    let mut lines: Vec<ReportLine> = protected
        .iter()
        .map(|name| ReportLine::Protected(name.clone()))
        .collect();

    let matched: Vec<_> = outcome
        .keys
        .iter()
        .filter(|k| !k.deleted.is_empty() || !k.failed.is_empty())
        .collect();

    for key in &matched {
        lines.push(ReportLine::Heading(key.key.clone()));
        lines.extend(key.deleted.iter().cloned().map(ReportLine::Deleted));
        lines.extend(key.failed.iter().map(|failure| ReportLine::Failed {
            path: failure.path.clone(),
            reason: failure.reason.clone(),
        }));
    }

    let missing = not_found_lines(requested.iter().copied(), |key| {
        matched.iter().any(|k| k.key == key)
    });

    if !matched.is_empty() && !missing.is_empty() {
        lines.push(ReportLine::Separator);
    }
    lines.extend(missing);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DeletionFailure, KeyOutcome};

    fn outcome(keys: Vec<KeyOutcome>) -> DeletionOutcome {
        DeletionOutcome { keys }
    }

    #[test]
    fn test_report_groups_and_separator() {
        let deleted = outcome(vec![KeyOutcome {
            key: "a.cfg".to_string(),
            deleted: vec![PathBuf::from("/r/a.cfg"), PathBuf::from("/r/sub/a.cfg")],
            failed: Vec::new(),
        }]);

        let lines = build_report(&["a.cfg", "b.cfg"], &[], &deleted);

        assert_eq!(
            lines,
            vec![
                ReportLine::Heading("a.cfg".to_string()),
                ReportLine::Deleted(PathBuf::from("/r/a.cfg")),
                ReportLine::Deleted(PathBuf::from("/r/sub/a.cfg")),
                ReportLine::Separator,
                ReportLine::NotFound("b.cfg".to_string()),
            ]
        );
    }

    #[test]
    fn test_report_without_matches_has_no_separator() {
        let lines = build_report(&["missing.cfg"], &[], &DeletionOutcome::default());

        assert_eq!(lines, vec![ReportLine::NotFound("missing.cfg".to_string())]);
        assert_eq!(lines[0].to_string(), "No file matching missing.cfg found");
    }

    #[test]
    fn test_report_all_found_has_no_separator() {
        let deleted = outcome(vec![KeyOutcome {
            key: "a".to_string(),
            deleted: vec![PathBuf::from("/r/a")],
            failed: Vec::new(),
        }]);

        let lines = build_report(&["a"], &[], &deleted);
        assert!(!lines.contains(&ReportLine::Separator));
    }

    #[test]
    fn test_report_lists_failures_and_protected_names() {
        let failed = outcome(vec![KeyOutcome {
            key: "gone.txt".to_string(),
            deleted: Vec::new(),
            failed: vec![DeletionFailure {
                path: PathBuf::from("/r/gone.txt"),
                reason: "No such file or directory".to_string(),
            }],
        }]);

        let lines = build_report(&["gone.txt"], &["remove-files".to_string()], &failed);

        assert_eq!(lines[0], ReportLine::Protected("remove-files".to_string()));
        assert_eq!(lines[1], ReportLine::Heading("gone.txt".to_string()));
        assert_eq!(
            lines[2].to_string(),
            "Failed to delete /r/gone.txt: No such file or directory"
        );
        assert_eq!(lines.len(), 3);
    }
}
