//! Folder tree layout: connector prefixes and pre-order traversal
//!
//! A row at depth 0 has no connector. Deeper rows are drawn as
//! `ancestor_prefix + connector`, where the connector depends on whether the
//! row is the last of its siblings. Rows below depth 0 extend the prefix
//! handed to their children by one fixed-width spacer.

use crate::types::Folder;

pub const CONNECTOR_LAST: &str = "└   ";
pub const CONNECTOR_MIDDLE: &str = "├  ";

/// Same display width as the connector they replace.
pub const SPACER_LAST: &str = "    ";
pub const SPACER_MIDDLE: &str = "   ";

pub fn connector(depth: usize, is_last: bool) -> &'static str {
    match (depth, is_last) {
        (0, _) => "",
        (_, true) => CONNECTOR_LAST,
        (_, false) => CONNECTOR_MIDDLE,
    }
}

/// Prefix passed down to the children of a row.
pub fn child_prefix(depth: usize, is_last: bool, ancestor_prefix: &str) -> String {
    if depth == 0 {
        return String::new();
    }
    let spacer = if is_last { SPACER_LAST } else { SPACER_MIDDLE };
    format!("{}{}", ancestor_prefix, spacer)
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub folder: &'a Folder,
    pub depth: usize,
    pub is_last: bool,
    pub ancestor_prefix: String,
}

impl TreeRow<'_> {
    /// Text drawn before the folder label.
    pub fn display_prefix(&self) -> String {
        format!("{}{}", self.ancestor_prefix, connector(self.depth, self.is_last))
    }

    pub fn child_prefix(&self) -> String {
        child_prefix(self.depth, self.is_last, &self.ancestor_prefix)
    }
}

/// Pre-order iterator over a subtree. Uses an explicit stack so arbitrarily
/// deep trees cannot overflow the call stack.
pub struct Rows<'a> {
    stack: Vec<TreeRow<'a>>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = TreeRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        let children = row.folder.children();
        if !children.is_empty() {
            let prefix = row.child_prefix();
            let last = children.len() - 1;
            // Reversed so the first child pops first
            for (idx, child) in children.iter().enumerate().rev() {
                self.stack.push(TreeRow {
                    folder: child,
                    depth: row.depth + 1,
                    is_last: idx == last,
                    ancestor_prefix: prefix.clone(),
                });
            }
        }
        Some(row)
    }
}

/// Rows for `node` and all of its descendants.
pub fn rows<'a>(node: &'a Folder, depth: usize, is_last: bool, ancestor_prefix: &str) -> Rows<'a> {
    Rows {
        stack: vec![TreeRow {
            folder: node,
            depth,
            is_last,
            ancestor_prefix: ancestor_prefix.to_string(),
        }],
    }
}

/// Sibling flag for the root at `idx` of a forest with `len` roots.
pub fn is_last_root(idx: usize, len: usize) -> bool {
    idx + 1 == len
}
