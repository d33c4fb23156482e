// src/episode/tree.rs — Frequent episode pattern tree (arena)
//
// Nodes live in a flat Vec and refer to their children by index. Node 0 is
// the root: empty label, no occurrences.

use super::occurrence::Occurrence;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// One episode in the search tree.
#[derive(Debug, Clone)]
pub struct Node<K> {
    /// Episode so far; the parent's label plus one symbol.
    pub label: Vec<K>,
    /// Minimal occurrences, sorted by start.
    pub minimal: Vec<Occurrence>,
    /// Greedy non-overlapping subset of `minimal`; its length is the support.
    pub non_overlapping: Vec<Occurrence>,
    pub children: Vec<NodeId>,
}

impl<K> Node<K> {
    pub fn support(&self) -> usize {
        self.non_overlapping.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PatternTree<K> {
    nodes: Vec<Node<K>>,
}

impl<K> Default for PatternTree<K> {
    fn default() -> Self {
        Self {
            nodes: vec![Node {
                label: Vec::new(),
                minimal: Vec::new(),
                non_overlapping: Vec::new(),
                children: Vec::new(),
            }],
        }
    }
}

impl<K: Clone> PatternTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a child labelled `parent.label + [symbol]` and return its id.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        symbol: K,
        minimal: Vec<Occurrence>,
        non_overlapping: Vec<Occurrence>,
    ) -> NodeId {
        let mut label = self.nodes[parent].label.clone();
        label.push(symbol);

        let id = self.nodes.len();
        self.nodes.push(Node {
            label,
            minimal,
            non_overlapping,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Non-root nodes in depth-first pre-order, children in insertion order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack: Vec<NodeId> = self.nodes[ROOT].children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    /// Leaf nodes in depth-first pre-order. An empty tree has no leaves.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }
}
