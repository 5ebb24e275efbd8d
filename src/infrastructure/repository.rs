//! JSON document persistence for the payload tree

use crate::domain::Folder;
use crate::error::{PayloadError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Indentation used when no config overrides it
pub const DEFAULT_INDENT: usize = 4;

/// Abstract storage for the whole payload tree
pub trait PayloadRepository {
    /// Where the tree is stored, reported with load failures
    fn location(&self) -> &Path;

    /// Read the stored tree; an absent document is an empty tree
    fn load(&self) -> Result<Folder>;

    /// Replace the stored tree
    fn save(&self, tree: &Folder) -> Result<()>;
}

/// Single pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    indent: usize,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        JsonFileRepository {
            path,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Render the tree the way it is written to disk
    pub fn to_json(&self, tree: &Folder) -> Result<String> {
        let indent = vec![b' '; self.indent];
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        tree.serialize(&mut serializer).map_err(io::Error::from)?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| PayloadError::Io(io::Error::other(e)))
    }

    fn corrupt(&self, reason: impl Into<String>) -> PayloadError {
        PayloadError::CorruptData {
            path: self.location().to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl PayloadRepository for JsonFileRepository {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Folder> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file, starting empty");
                return Ok(Folder::new());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(self.corrupt("file is not valid UTF-8"));
            }
            Err(e) => return Err(PayloadError::Io(e)),
        };

        let tree: Folder =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e.to_string()))?;
        tree.validate()
            .map_err(|path| self.corrupt(format!("invalid entry name at '{}'", path)))?;

        debug!(path = %self.path.display(), entries = tree.len(), "loaded payload tree");
        Ok(tree)
    }

    fn save(&self, tree: &Folder) -> Result<()> {
        let contents = self.to_json(tree)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), "saved payload tree");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, NodePath};
    use tempfile::TempDir;

    fn repo_in(temp: &TempDir) -> JsonFileRepository {
        JsonFileRepository::new(temp.path().join("payload_data.json"))
    }

    fn sample() -> Folder {
        let mut tools = Folder::new();
        tools
            .insert("xss.txt", Node::File("<script>alert(1)</script>\n载荷".to_string()))
            .unwrap();
        tools.insert("empty", Node::empty_folder()).unwrap();
        let mut root = Folder::new();
        root.insert("tools", Node::Folder(tools)).unwrap();
        root.insert("notes", Node::empty_file()).unwrap();
        root
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let tree = repo_in(&temp).load().unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let tree = sample();

        repo.save(&tree).unwrap();
        let loaded = repo.load().unwrap();

        assert_eq!(loaded, tree);
        let names: Vec<&str> = loaded.entries().map(|(name, _)| name).collect();
        assert_eq!(names, ["tools", "notes"]);
    }

    #[test]
    fn test_save_pretty_prints_with_indent() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let mut root = Folder::new();
        root.insert("a", Node::File("x".to_string())).unwrap();

        repo.save(&root).unwrap();
        let written = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(written, "{\n    \"a\": \"x\"\n}\n");

        let repo = repo.with_indent(2);
        repo.save(&root).unwrap();
        let written = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(written, "{\n  \"a\": \"x\"\n}\n");
    }

    #[test]
    fn test_save_keeps_non_ascii_unescaped() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);

        repo.save(&sample()).unwrap();
        let written = fs::read_to_string(repo.path()).unwrap();
        assert!(written.contains("载荷"));
        assert!(written.contains("\\n"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path().join("nested/dir/data.json"));
        repo.save(&sample()).unwrap();
        assert!(repo.exists());
    }

    #[test]
    fn test_load_rejects_non_string_value() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), r#"{"a": {"b": 5}}"#).unwrap();

        match repo.load() {
            Err(PayloadError::CorruptData { path, .. }) => assert_eq!(path, repo.path()),
            other => panic!("Expected CorruptData, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), r#"["a", "b"]"#).unwrap();
        assert!(matches!(repo.load(), Err(PayloadError::CorruptData { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), "{not json").unwrap();
        assert!(matches!(repo.load(), Err(PayloadError::CorruptData { .. })));
    }

    #[test]
    fn test_load_rejects_empty_names() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), r#"{"a": {"": "x"}}"#).unwrap();

        match repo.load() {
            Err(PayloadError::CorruptData { path, reason }) => {
                assert_eq!(path, repo.location());
                assert!(reason.contains("invalid entry name"));
            }
            other => panic!("Expected CorruptData, got {:?}", other),
        }
    }

    #[test]
    fn test_load_accepts_slash_in_names() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), r#"{"HTTP/2": {"smuggle.txt": "x"}, "../../etc": "y"}"#).unwrap();

        let tree = repo.load().unwrap();
        let file = NodePath::from_segments(["HTTP/2", "smuggle.txt"]);
        assert_eq!(tree.file(&file).unwrap(), "x");

        repo.save(&tree).unwrap();
        assert_eq!(repo.load().unwrap(), tree);
    }

    #[test]
    fn test_load_keeps_blank_lines_from_disk() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        fs::write(repo.path(), r#"{"f": "a\n\nb\n"}"#).unwrap();

        let tree = repo.load().unwrap();
        let path: NodePath = "f".parse().unwrap();
        assert_eq!(tree.file(&path).unwrap(), "a\n\nb\n");
    }

    #[test]
    fn test_location() {
        let repo = JsonFileRepository::new(PathBuf::from("data.json"));
        assert_eq!(repo.location(), Path::new("data.json"));
    }
}
