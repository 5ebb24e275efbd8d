//! Line-set editing of payload file content
//!
//! A file's content is treated as an ordered set of payload lines joined by
//! `\n`. Appending skips blank and already-present lines; removal keeps the
//! order of the surviving lines.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// How lines to remove are compared against stored lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMatch {
    /// Compare both sides with surrounding whitespace trimmed; blank
    /// deletion lines match nothing
    #[default]
    Trimmed,
    /// Compare both sides byte for byte
    Exact,
}

impl FromStr for RemovalMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trimmed" => Ok(RemovalMatch::Trimmed),
            "exact" => Ok(RemovalMatch::Exact),
            _ => Err(format!(
                "Invalid removal_match: '{}'. Valid values are: trimmed, exact",
                s
            )),
        }
    }
}

impl RemovalMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalMatch::Trimmed => "trimmed",
            RemovalMatch::Exact => "exact",
        }
    }
}

/// Result of a line edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub content: String,
    pub changed: bool,
    /// Lines appended or removed
    pub count: usize,
}

/// Split raw multi-line text into lines (`\n` or `\r\n`)
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Append candidates that are non-blank after trimming and not yet present,
/// either in the content or earlier in the same batch.
///
/// When anything is appended the content is rejoined with `\n`: `\r\n`
/// becomes `\n` and a trailing newline is dropped. When nothing is appended
/// the content is returned untouched.
pub fn dedup_append<I, S>(content: &str, candidates: I) -> LineEdit
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut seen: HashSet<String> = lines.iter().cloned().collect();
    let mut count = 0;

    for candidate in candidates {
        let line = candidate.as_ref().trim();
        if line.is_empty() || seen.contains(line) {
            continue;
        }
        seen.insert(line.to_string());
        lines.push(line.to_string());
        count += 1;
    }

    if count == 0 {
        return LineEdit {
            content: content.to_string(),
            changed: false,
            count,
        };
    }

    LineEdit {
        content: lines.join("\n"),
        changed: true,
        count,
    }
}

/// Drop every stored line matching one of `targets`.
///
/// When nothing matches, the content is returned untouched.
pub fn remove_lines<I, S>(content: &str, targets: I, matching: RemovalMatch) -> LineEdit
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let targets: HashSet<String> = targets
        .into_iter()
        .filter_map(|target| {
            let target = target.as_ref();
            match matching {
                RemovalMatch::Exact => Some(target.to_string()),
                RemovalMatch::Trimmed => {
                    let trimmed = target.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                }
            }
        })
        .collect();

    let original: Vec<&str> = content.lines().collect();
    let kept: Vec<&str> = original
        .iter()
        .copied()
        .filter(|line| {
            let key = match matching {
                RemovalMatch::Exact => *line,
                RemovalMatch::Trimmed => line.trim(),
            };
            !targets.contains(key)
        })
        .collect();

    let count = original.len() - kept.len();
    if count == 0 {
        return LineEdit {
            content: content.to_string(),
            changed: false,
            count,
        };
    }

    LineEdit {
        content: kept.join("\n"),
        changed: true,
        count,
    }
}
