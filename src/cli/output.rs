//! Output formatting utilities

use crate::domain::{Folder, Node};
use crate::infrastructure::Config;

/// Format a folder as an indented tree; folders end with `/`
pub fn format_tree(folder: &Folder) -> String {
    if folder.is_empty() {
        return "No entries".to_string();
    }

    let mut lines = Vec::new();
    push_entries(&mut lines, folder, 0);
    lines.join("\n")
}

fn push_entries(lines: &mut Vec<String>, folder: &Folder, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, node) in folder.entries() {
        match node {
            Node::Folder(child) => {
                lines.push(format!("{}{}/", indent, name));
                push_entries(lines, child, depth + 1);
            }
            Node::File(_) => lines.push(format!("{}{}", indent, name)),
        }
    }
}

/// Format all config values, one `key = value` per line
pub fn format_config(config: &Config) -> String {
    format!(
        "data_file = {}\nindent = {}\nremoval_match = {}",
        config.data_file.display(),
        config.indent,
        config.removal_match.as_str()
    )
}
