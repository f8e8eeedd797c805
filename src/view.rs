use crate::{ReportForest, ReportNode};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier for a node: the path of child indices from the root
/// of the forest. Index paths stay unique when labels repeat across
/// categories, which label-derived keys do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Which nodes are expanded in a nested-drawer rendering. Owned by the
/// rendering layer, keyed independently of the forest, and never
/// persisted. Unseen nodes are collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    open: HashMap<NodePath, bool>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, path: &NodePath) -> bool {
        self.open.get(path).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, path: &NodePath) {
        let entry = self.open.entry(path.clone()).or_insert(false);
        *entry = !*entry;
    }

    pub fn set_open(&mut self, path: NodePath, open: bool) {
        self.open.insert(path, open);
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    /// Opens every node of the forest that has children.
    pub fn open_all(&mut self, forest: &ReportForest) {
        for (i, root) in forest.roots.iter().enumerate() {
            self.open_recursive(NodePath::root(i), root);
        }
    }

    fn open_recursive(&mut self, path: NodePath, node: &ReportNode) {
        if node.children.is_empty() {
            return;
        }
        for (i, child) in node.children.iter().enumerate() {
            self.open_recursive(path.child(i), child);
        }
        self.set_open(path, true);
    }
}
