//! Payload tree model: folders of named nodes, files of payload text

use crate::domain::path::NodePath;
use crate::error::{PayloadError, Result};
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// A named entry inside a folder.
///
/// Serialized untagged: a folder is a JSON object, a file is a JSON string.
/// Any other JSON value fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Folder(Folder),
    File(String),
}

impl Node {
    /// Empty file node
    pub fn empty_file() -> Self {
        Node::File(String::new())
    }

    /// Empty folder node
    pub fn empty_folder() -> Self {
        Node::Folder(Folder::new())
    }

    /// Borrowed view of this node
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Node::Folder(folder) => NodeRef::Folder(folder),
            Node::File(content) => NodeRef::File(content),
        }
    }
}

/// Borrowed view of a resolved node. The root folder is not an entry of
/// any folder, so resolution hands out views instead of `&Node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Folder(&'a Folder),
    File(&'a str),
}

/// Insertion-ordered mapping from names to nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Folder {
    entries: LinkedHashMap<String, Node>,
}

/// Check that a name can be stored in a folder.
///
/// Any non-empty string is a name; a `/` inside it is escaped in the
/// textual path form.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
}

impl Folder {
    pub fn new() -> Self {
        Folder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    /// Insert `node` under `name`, replacing any existing entry.
    ///
    /// A replaced entry keeps its position.
    pub fn insert(&mut self, name: &str, node: Node) -> Result<Option<Node>> {
        if !is_valid_name(name) {
            return Err(PayloadError::InvalidName(name.to_string()));
        }
        Ok(self.entries.replace(name.to_string(), node))
    }

    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.entries.remove(name)
    }

    /// Walk `path` as a chain of folders
    pub fn folder(&self, path: &NodePath) -> Result<&Folder> {
        let mut current = self;
        for (depth, name) in path.segments().iter().enumerate() {
            current = match current.entries.get(name) {
                Some(Node::Folder(folder)) => folder,
                Some(Node::File(_)) => {
                    return Err(PayloadError::NotAFolder(path.prefix(depth + 1)))
                }
                None => return Err(PayloadError::NotFound(path.prefix(depth + 1))),
            };
        }
        Ok(current)
    }

    pub fn folder_mut(&mut self, path: &NodePath) -> Result<&mut Folder> {
        let mut current = self;
        for (depth, name) in path.segments().iter().enumerate() {
            current = match current.entries.get_mut(name) {
                Some(Node::Folder(folder)) => folder,
                Some(Node::File(_)) => {
                    return Err(PayloadError::NotAFolder(path.prefix(depth + 1)))
                }
                None => return Err(PayloadError::NotFound(path.prefix(depth + 1))),
            };
        }
        Ok(current)
    }

    /// Walk `path` as a chain of folders, creating missing ones on the way
    pub fn folder_or_create_mut(&mut self, path: &NodePath) -> Result<&mut Folder> {
        let mut current = self;
        for (depth, name) in path.segments().iter().enumerate() {
            if !is_valid_name(name) {
                return Err(PayloadError::InvalidName(name.clone()));
            }
            current = match current
                .entries
                .entry(name.clone())
                .or_insert_with(Node::empty_folder)
            {
                Node::Folder(folder) => folder,
                Node::File(_) => return Err(PayloadError::NotAFolder(path.prefix(depth + 1))),
            };
        }
        Ok(current)
    }

    /// Resolve `path` to the node it names. The empty path is this folder.
    pub fn resolve(&self, path: &NodePath) -> Result<NodeRef<'_>> {
        let Some((parent, name)) = path.split_last() else {
            return Ok(NodeRef::Folder(self));
        };
        match self.folder(&parent)?.entries.get(name) {
            Some(node) => Ok(node.view()),
            None => Err(PayloadError::NotFound(path.clone())),
        }
    }

    /// Content of the file at `path`
    pub fn file(&self, path: &NodePath) -> Result<&str> {
        match self.resolve(path)? {
            NodeRef::File(content) => Ok(content),
            NodeRef::Folder(_) => Err(PayloadError::NotAFile(path.clone())),
        }
    }

    pub fn file_mut(&mut self, path: &NodePath) -> Result<&mut String> {
        let Some((parent, name)) = path.split_last() else {
            return Err(PayloadError::NotAFile(path.clone()));
        };
        match self.folder_mut(&parent)?.entries.get_mut(name) {
            Some(Node::File(content)) => Ok(content),
            Some(Node::Folder(_)) => Err(PayloadError::NotAFile(path.clone())),
            None => Err(PayloadError::NotFound(path.clone())),
        }
    }

    /// Find the first entry with an empty name
    pub fn validate(&self) -> std::result::Result<(), NodePath> {
        self.validate_at(&NodePath::root())
    }

    fn validate_at(&self, at: &NodePath) -> std::result::Result<(), NodePath> {
        for (name, node) in &self.entries {
            let path = at.join(name);
            if !is_valid_name(name) {
                return Err(path);
            }
            if let Node::Folder(folder) = node {
                folder.validate_at(&path)?;
            }
        }
        Ok(())
    }
}
