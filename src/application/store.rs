//! Payload store: the tree, path-based edits and save-on-success

use crate::domain::{
    dedup_append, remove_lines, split_lines, Folder, Node, NodePath, NodeRef, RemovalMatch,
};
use crate::error::{PayloadError, Result};
use crate::infrastructure::{JsonFileRepository, PayloadRepository};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Owns the payload tree and writes it back after every change.
///
/// Every mutating operation either applies its change and persists the whole
/// tree, or leaves the in-memory tree exactly as it was.
#[derive(Debug)]
pub struct PayloadStore<R: PayloadRepository = JsonFileRepository> {
    repository: R,
    tree: Folder,
    removal_match: RemovalMatch,
}

impl<R: PayloadRepository> PayloadStore<R> {
    /// Create a store with an empty tree, without reading the repository
    pub fn new(repository: R) -> Self {
        PayloadStore {
            repository,
            tree: Folder::new(),
            removal_match: RemovalMatch::default(),
        }
    }

    /// Create a store and load the stored tree
    pub fn open(repository: R) -> Result<Self> {
        let mut store = Self::new(repository);
        store.load()?;
        Ok(store)
    }

    pub fn with_removal_match(mut self, removal_match: RemovalMatch) -> Self {
        self.removal_match = removal_match;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn tree(&self) -> &Folder {
        &self.tree
    }

    /// Replace the in-memory tree with the stored one.
    /// On failure the current tree is kept.
    pub fn load(&mut self) -> Result<()> {
        self.tree = self.repository.load()?;
        debug!(location = %self.repository.location().display(), "payload tree ready");
        Ok(())
    }

    /// Write the current tree to the repository as is
    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.tree)?;
        debug!(location = %self.repository.location().display(), "payload tree written");
        Ok(())
    }

    pub fn resolve(&self, path: &NodePath) -> Result<NodeRef<'_>> {
        self.tree.resolve(path)
    }

    /// Create an empty folder, replacing whatever was stored under `name`.
    /// Missing folders along `parent` are created.
    pub fn create_folder(&mut self, parent: &NodePath, name: &str) -> Result<()> {
        self.create(parent, name, Node::empty_folder())?;
        info!(parent = %parent, name, "created folder");
        Ok(())
    }

    /// Create an empty file, replacing whatever was stored under `name`.
    /// Missing folders along `parent` are created.
    pub fn create_file(&mut self, parent: &NodePath, name: &str) -> Result<()> {
        self.create(parent, name, Node::empty_file())?;
        info!(parent = %parent, name, "created file");
        Ok(())
    }

    fn create(&mut self, parent: &NodePath, name: &str, node: Node) -> Result<()> {
        self.commit(|tree| {
            let replaced = tree.folder_or_create_mut(parent)?.insert(name, node)?;
            if replaced.is_some() {
                debug!(parent = %parent, name, "replaced existing entry");
            }
            Ok(())
        })
    }

    /// Remove a node and everything below it
    pub fn delete_node(&mut self, path: &NodePath) -> Result<Node> {
        let Some((parent, name)) = path.split_last() else {
            return Err(PayloadError::NotFound(path.clone()));
        };

        let removed = self.commit(|tree| {
            tree.folder_mut(&parent)?
                .remove(name)
                .ok_or_else(|| PayloadError::NotFound(path.clone()))
        })?;

        info!(path = %path, "deleted node");
        Ok(removed)
    }

    pub fn read_file(&self, path: &NodePath) -> Result<&str> {
        self.tree.file(path)
    }

    /// Append new, non-blank lines to a file and return its content
    pub fn append_lines<I, S>(&mut self, path: &NodePath, lines: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let edit = dedup_append(self.tree.file(path)?, lines);
        let content = edit.content.clone();

        self.commit(|tree| {
            *tree.file_mut(path)? = edit.content;
            Ok(())
        })?;

        info!(path = %path, added = edit.count, "appended lines");
        Ok(content)
    }

    /// Remove matching lines from a file.
    ///
    /// Returns the content and whether anything was removed; nothing is
    /// persisted when no line matched.
    pub fn remove_lines<I, S>(&mut self, path: &NodePath, lines: I) -> Result<(String, bool)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let edit = remove_lines(self.tree.file(path)?, lines, self.removal_match);
        if !edit.changed {
            debug!(path = %path, "no matching lines to remove");
            return Ok((edit.content, false));
        }

        let content = edit.content.clone();
        self.commit(|tree| {
            *tree.file_mut(path)? = edit.content;
            Ok(())
        })?;

        info!(path = %path, removed = edit.count, "removed lines");
        Ok((content, true))
    }

    /// Bulk variant of [`append_lines`](Self::append_lines)
    pub fn import_lines<I, S>(&mut self, path: &NodePath, lines: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append_lines(path, lines)
    }

    /// Import every line of a UTF-8 text file
    pub fn import_lines_from_file(&mut self, path: &NodePath, source: &Path) -> Result<String> {
        self.read_file(path)?;
        let text = fs::read_to_string(source)?;
        debug!(source = %source.display(), "read import source");
        self.import_lines(path, split_lines(&text))
    }

    /// Apply `change` and persist; restore the previous tree on any failure
    fn commit<T>(&mut self, change: impl FnOnce(&mut Folder) -> Result<T>) -> Result<T> {
        let snapshot = self.tree.clone();

        let outcome = change(&mut self.tree).and_then(|value| {
            self.repository.save(&self.tree)?;
            Ok(value)
        });

        if outcome.is_err() {
            self.tree = snapshot;
        }
        outcome
    }
}
