//! Error types for payman

use crate::domain::NodePath;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for payman application
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Not found: {0}")]
    NotFound(NodePath),

    #[error("Not a folder: {0}")]
    NotAFolder(NodePath),

    #[error("Not a file: {0}")]
    NotAFile(NodePath),

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Corrupt data in {}: {reason}", .path.display())]
    CorruptData { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl PayloadError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PayloadError::NotFound(_) => 2,
            PayloadError::NotAFolder(_) | PayloadError::NotAFile(_) => 3,
            PayloadError::CorruptData { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            PayloadError::NotFound(path) => {
                format!(
                    "Not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'payman tree' to see existing folders and files\n\
                    • Paths are case-sensitive and separated by '/'\n\
                    • Write a '/' inside a name as '\\/' (e.g. HTTP\\/2)",
                    path
                )
            }
            PayloadError::NotAFile(path) => {
                format!(
                    "Not a file: {}\n\n\
                    This operation needs a file, but the path names a folder.\n\
                    Create one with: payman touch {}/<name>",
                    path, path
                )
            }
            PayloadError::NotAFolder(path) => {
                format!(
                    "Not a folder: {}\n\n\
                    Files cannot contain other entries.\n\
                    Create a folder with: payman mkdir <path>",
                    path
                )
            }
            PayloadError::InvalidName(name) => {
                format!(
                    "Invalid name: '{}'\n\n\
                    Names must be non-empty",
                    name
                )
            }
            PayloadError::CorruptData { path, reason } => {
                format!(
                    "Corrupt data in {}: {}\n\n\
                    Suggestions:\n\
                    • The document root must be a JSON object\n\
                    • Every value must be an object (folder) or a string (file)\n\
                    • Fix the file by hand; payman will not overwrite it until it loads",
                    path.display(),
                    reason
                )
            }
            PayloadError::Config(msg) => {
                if msg.starts_with("Invalid removal_match") {
                    format!(
                        "{}\n\n\
                        Valid values: trimmed, exact\n\
                        Example: payman config removal_match exact",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using PayloadError
pub type Result<T> = std::result::Result<T, PayloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let path = NodePath::from_segments(["tools"]);
        assert_eq!(PayloadError::NotFound(path.clone()).exit_code(), 2);
        assert_eq!(PayloadError::NotAFolder(path.clone()).exit_code(), 3);
        assert_eq!(PayloadError::NotAFile(path).exit_code(), 3);
        let corrupt = PayloadError::CorruptData {
            path: PathBuf::from("data.json"),
            reason: "bad".to_string(),
        };
        assert_eq!(corrupt.exit_code(), 4);
        assert_eq!(PayloadError::Config("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_not_found_suggestions() {
        let err = PayloadError::NotFound(NodePath::from_segments(["tools", "xss.txt"]));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("tools/xss.txt"));
        assert!(msg.contains("payman tree"));
    }

    #[test]
    fn test_not_a_file_suggestions() {
        let err = PayloadError::NotAFile(NodePath::from_segments(["tools"]));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("payman touch tools/<name>"));
    }

    #[test]
    fn test_corrupt_data_suggestions() {
        let err = PayloadError::CorruptData {
            path: PathBuf::from("payload_data.json"),
            reason: "expected object".to_string(),
        };
        let msg = err.display_with_suggestions();
        assert!(msg.contains("payload_data.json"));
        assert!(msg.contains("JSON object"));
    }

    #[test]
    fn test_config_removal_match_suggestions() {
        let err = PayloadError::Config("Invalid removal_match: fuzzy".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("trimmed, exact"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = PayloadError::Io(std::io::Error::other("disk full"));
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "IO error: disk full");
    }
}
