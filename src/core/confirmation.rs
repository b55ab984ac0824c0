use anyhow::Context;
use log::{debug, info, warn};
use std::io::{BufRead, Write};

const PROMPT: &str = "Enter the numbers of the files to delete, separated by commas (e.g. 1,3,4): ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no selection entered")]
    Empty,

    #[error("missing number at position {position}")]
    MissingNumber { position: usize },

    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("input is not valid UTF-8")]
    InvalidEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Candidate names picked by the operator; may be empty when every
    /// index was out of range.
    Confirmed(Vec<String>),
    Rejected(SelectionError),
}

/// Parses one or more positive integers separated by commas, after trimming
/// surrounding whitespace. Numbers too large to represent are kept as
/// `usize::MAX` so they fall out of range later instead of failing here.
pub fn parse_selection(input: &str) -> Result<Vec<usize>, SelectionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::Empty);
    }

    let mut indices = Vec::new();
    let mut offset = 0;
    for part in trimmed.split(',') {
        if part.is_empty() {
            return Err(SelectionError::MissingNumber {
                position: offset + 1,
            });
        }
        if let Some((i, found)) = part.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(SelectionError::UnexpectedChar {
                found,
                position: offset + i + 1,
            });
        }
        indices.push(part.parse::<usize>().unwrap_or(usize::MAX));
        offset += part.len() + 1;
    }

    Ok(indices)
}

/// Maps 1-based indices onto candidate names. Out-of-range indices are
/// logged and ignored; repeated picks collapse to one.
pub fn resolve_selection(indices: &[usize], candidates: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for &index in indices {
        match index.checked_sub(1).and_then(|i| candidates.get(i)) {
            Some(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            None => warn!(
                "Ignoring selection {}: valid numbers are 1 to {}",
                index,
                candidates.len()
            ),
        }
    }
    names
}

pub fn list_candidates<W: Write>(candidates: &[String], out: &mut W) -> anyhow::Result<()> {
    for (i, name) in candidates.iter().enumerate() {
        writeln!(out, "{}.{}", i + 1, name)?;
    }
    Ok(())
}

/// Lists the candidates, prompts once and reads a single line of input.
/// There is no retry: malformed input yields `Confirmation::Rejected`.
pub fn confirm<R: BufRead, W: Write>(
    candidates: &[String],
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Confirmation> {
    debug!("Awaiting confirmation for {} candidates", candidates.len());
    list_candidates(candidates, out)?;
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    let mut raw = Vec::new();
    input
        .read_until(b'\n', &mut raw)
        .context("Failed to read selection from standard input")?;
    debug!("Selection input: {:?}", String::from_utf8_lossy(&raw));

    let Ok(line) = String::from_utf8(raw) else {
        warn!("Rejected selection: input is not valid UTF-8");
        return Ok(Confirmation::Rejected(SelectionError::InvalidEncoding));
    };

    match parse_selection(&line) {
        Ok(indices) => {
            let names = resolve_selection(&indices, candidates);
            info!("Confirmed {} of {} candidates", names.len(), candidates.len());
            Ok(Confirmation::Confirmed(names))
        }
        Err(e) => {
            warn!("Rejected selection {:?}: {}", line.trim(), e);
            Ok(Confirmation::Rejected(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidates() -> Vec<String> {
        vec!["a.log".to_string(), "b.log".to_string(), "c.log".to_string()]
    }

    #[test]
    fn test_parse_selection_accepts_comma_lists() {
        assert_eq!(parse_selection("1"), Ok(vec![1]));
        assert_eq!(parse_selection("  3,1,2\n"), Ok(vec![3, 1, 2]));
        assert_eq!(parse_selection("0,10"), Ok(vec![0, 10]));
    }

    #[test]
    fn test_parse_selection_rejects_malformed_input() {
        assert_eq!(parse_selection(""), Err(SelectionError::Empty));
        assert_eq!(parse_selection(" \n"), Err(SelectionError::Empty));
        assert_eq!(
            parse_selection("1, 2"),
            Err(SelectionError::UnexpectedChar {
                found: ' ',
                position: 3
            })
        );
        assert_eq!(
            parse_selection("1,,2"),
            Err(SelectionError::MissingNumber { position: 3 })
        );
        assert_eq!(
            parse_selection("1,"),
            Err(SelectionError::MissingNumber { position: 3 })
        );
        assert_eq!(
            parse_selection("-1"),
            Err(SelectionError::UnexpectedChar {
                found: '-',
                position: 1
            })
        );
        assert!(parse_selection("all").is_err());
        assert!(parse_selection("1;2").is_err());
    }

    #[test]
    fn test_parse_selection_huge_number_is_out_of_range() {
        let indices = parse_selection("99999999999999999999999999").unwrap();
        assert!(resolve_selection(&indices, &candidates()).is_empty());
    }

    #[test]
    fn test_resolve_selection_ignores_out_of_range() {
        let names = resolve_selection(&[0, 2, 4, 2, 1], &candidates());
        assert_eq!(names, vec!["b.log".to_string(), "a.log".to_string()]);
    }

    #[test]
    fn test_confirm_lists_and_accepts() {
        let mut input = Cursor::new("1,3\n");
        let mut out = Vec::new();

        let confirmation = confirm(&candidates(), &mut input, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("1.a.log\n2.b.log\n3.c.log\n"));
        assert!(printed.contains("separated by commas"));
        assert_eq!(
            confirmation,
            Confirmation::Confirmed(vec!["a.log".to_string(), "c.log".to_string()])
        );
    }

    #[test]
    fn test_confirm_rejects_without_retry() {
        let mut input = Cursor::new("yes\n1\n");
        let mut out = Vec::new();

        let confirmation = confirm(&candidates(), &mut input, &mut out).unwrap();

        assert!(matches!(confirmation, Confirmation::Rejected(_)));
    }

    #[test]
    fn test_confirm_rejects_invalid_utf8() {
        let mut input = Cursor::new(vec![0xff, b'1', b'\n']);
        let mut out = Vec::new();

        let confirmation = confirm(&candidates(), &mut input, &mut out).unwrap();

        assert_eq!(
            confirmation,
            Confirmation::Rejected(SelectionError::InvalidEncoding)
        );
    }

    #[test]
    fn test_confirm_end_of_input_is_rejected() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let confirmation = confirm(&candidates(), &mut input, &mut out).unwrap();

        assert_eq!(confirmation, Confirmation::Rejected(SelectionError::Empty));
    }
}
