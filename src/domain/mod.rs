//! Domain layer - Payload tree model and line editing

pub mod lines;
pub mod node;
pub mod path;

pub use lines::{dedup_append, remove_lines, split_lines, LineEdit, RemovalMatch};
pub use node::{is_valid_name, Folder, Node, NodeRef};
pub use path::NodePath;
