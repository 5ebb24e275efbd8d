//! Node paths inside the payload tree

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator used by the textual form of a path
pub const SEPARATOR: char = '/';

/// Escapes a separator or itself inside a segment of the textual form
pub const ESCAPE: char = '\\';

/// Ordered list of names from the root to a node.
///
/// The empty path is the root folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The root folder
    pub fn root() -> Self {
        NodePath::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodePath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the parent path and the last segment
    pub fn split_last(&self) -> Option<(NodePath, &str)> {
        let (last, rest) = self.segments.split_last()?;
        Some((NodePath::from_segments(rest.iter().cloned()), last.as_str()))
    }

    pub fn join(&self, name: &str) -> NodePath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        NodePath { segments }
    }

    /// Path made of the first `len` segments
    pub(crate) fn prefix(&self, len: usize) -> NodePath {
        NodePath::from_segments(self.segments[..len.min(self.segments.len())].iter().cloned())
    }
}

/// Textual form parsing: `/` separates segments, `\/` and `\\` stand for a
/// literal slash and backslash inside a name, empty segments are skipped.
impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => current.push(chars.next().unwrap_or(ESCAPE)),
                SEPARATOR => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        NodePath { segments }
    }
}

impl FromStr for NodePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodePath::from(s))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{}", SEPARATOR);
        }
        let escaped: Vec<String> = self.segments.iter().map(|s| escape_segment(s)).collect();
        write!(f, "{}", escaped.join(&SEPARATOR.to_string()))
    }
}

fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c == SEPARATOR || c == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
