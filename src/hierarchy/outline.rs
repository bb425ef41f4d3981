//! Depth-first outline rendering over a child index.

use serde::Serialize;
use std::collections::HashSet;

use super::ChildIndex;
use crate::error::{PackvizError, Result};
use crate::record::{display_name, Record, UNKNOWN_LABEL};

/// One node of a nested (key, label) outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Total number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::depth).max().unwrap_or(0)
    }
}

/// Render the outline below `root`.
///
/// Fails with [`PackvizError::CyclicHierarchy`] when a record reappears on its
/// own ancestor path. Keyless records are leaves.
pub fn outline(root: &Record, index: &ChildIndex<'_>) -> Result<OutlineNode> {
    let mut path = HashSet::new();
    visit(root, index, &mut path)
}

fn visit(record: &Record, index: &ChildIndex<'_>, path: &mut HashSet<String>) -> Result<OutlineNode> {
    let label = display_name(record);
    let key = match record.key() {
        Some(key) => key.into_string(),
        None => {
            return Ok(OutlineNode {
                key: UNKNOWN_LABEL.to_string(),
                label,
                children: Vec::new(),
            })
        }
    };

    if !path.insert(key.clone()) {
        return Err(PackvizError::CyclicHierarchy { key });
    }

    let children = index
        .children_of(&key)
        .iter()
        .map(|child| visit(child, index, path))
        .collect::<Result<Vec<_>>>()?;

    path.remove(&key);
    Ok(OutlineNode { key, label, children })
}
