/// KdTree3 — loose 3D k-d tree over axis-aligned boundaries.
///
/// Each item is stored in exactly one node: the first node, walking down
/// from the root, where no child fully contains the item's boundary (or
/// the node reached at `max_depth`). Children are created lazily by
/// bisecting the node along its longest axis when an item would fit in
/// one of the halves.
///
/// Node boundaries start as the half of their parent's split and grow to
/// cover every item stored directly at them, so a node's boundary always
/// contains every item reachable through it, and is always contained in
/// its parent's boundary.
///
/// Nodes live in a flat arena; `left`/`right` are arena indices.

use crate::boundary::{AABB, Boundary};
use crate::error::{Error, Result};
use crate::engine_bail;

/// Arena index of a node
pub type NodeId = usize;

/// Index of the root node in the flat node array.
pub const ROOT: NodeId = 0;

/// Maximum depth used by [`KdTree3::new`].
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// An item wrapped with its insertion index and boundary.
#[derive(Debug, Clone)]
pub struct KdItem<T, B: Boundary = AABB> {
    /// Sequential insertion index, unique in the tree
    pub index: usize,
    /// Boundary the item was inserted with
    pub aabb: B,
    /// Payload
    pub item: T,
}

/// A single node of the tree.
#[derive(Debug, Clone)]
pub struct KdNode<T, B: Boundary = AABB> {
    index: NodeId,
    aabb: B,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Items that straddle this node's split, or reached `max_depth` here
    items: Vec<KdItem<T, B>>,
}

impl<T, B: Boundary> KdNode<T, B> {
    fn new(index: NodeId, aabb: B) -> Self {
        Self { index, aabb, left: None, right: None, items: Vec::new() }
    }

    /// Sequential creation index (equal to the arena index)
    pub fn index(&self) -> NodeId {
        self.index
    }

    pub fn aabb(&self) -> &B {
        &self.aabb
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Items stored directly at this node
    pub fn items(&self) -> &[KdItem<T, B>] {
        &self.items
    }

    /// Existing children, left first
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

/// Loose k-d tree with insertion only.
#[derive(Debug, Clone)]
pub struct KdTree3<T, B: Boundary = AABB> {
    nodes: Vec<KdNode<T, B>>,
    max_depth: usize,
    num_items: usize,
}

impl<T, B: Boundary> KdTree3<T, B> {
    /// Create an empty tree rooted at `aabb` with [`DEFAULT_MAX_DEPTH`].
    pub fn new(aabb: B) -> Self {
        Self::with_max_depth(aabb, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty tree rooted at `aabb`.
    ///
    /// The root is at depth 1, so a `max_depth` of 1 (or 0) keeps every
    /// item at the root.
    pub fn with_max_depth(aabb: B, max_depth: usize) -> Self {
        Self {
            nodes: vec![KdNode::new(ROOT, aabb)],
            max_depth,
            num_items: 0,
        }
    }

    /// Insert an item and return its sequential index.
    ///
    /// Fails with [`Error::InvalidBoundary`] if `aabb` contains NaN or is
    /// inverted. Items outside the root boundary are stored at the root,
    /// which grows to cover them.
    pub fn insert_item(&mut self, item: T, aabb: B) -> Result<usize> {
        if !aabb.is_valid() {
            engine_bail!(Error::InvalidBoundary, "galaxy3d::KdTree3",
                "Cannot insert item with boundary {:?}", aabb);
        }

        let index = self.num_items;
        self.num_items += 1;
        let kd_item = KdItem { index, aabb, item };

        let mut node_id = ROOT;
        let mut depth = 1;

        loop {
            if depth >= self.max_depth {
                break;
            }

            if let Some(child) = self.containing_child(node_id, &aabb) {
                node_id = child;
                depth += 1;
                continue;
            }

            let node_aabb = self.nodes[node_id].aabb;
            let (lower, upper) = node_aabb.split(node_aabb.longest_axis());

            if self.nodes[node_id].left.is_none() {
                let left = self.push_node(lower);
                self.nodes[node_id].left = Some(left);
                if lower.contains(&aabb) {
                    node_id = left;
                    depth += 1;
                    continue;
                }
            }

            if self.nodes[node_id].right.is_none() {
                let right = self.push_node(upper);
                self.nodes[node_id].right = Some(right);
                if upper.contains(&aabb) {
                    node_id = right;
                    depth += 1;
                    continue;
                }
            }

            // Straddles the split
            break;
        }

        let node = &mut self.nodes[node_id];
        node.aabb.expand(&aabb);
        node.items.push(kd_item);
        Ok(index)
    }

    /// Existing child of `node_id` that fully contains `aabb`, left first.
    fn containing_child(&self, node_id: NodeId, aabb: &B) -> Option<NodeId> {
        self.nodes[node_id]
            .children()
            .find(|&child| self.nodes[child].aabb.contains(aabb))
    }

    fn push_node(&mut self, aabb: B) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(KdNode::new(id, aabb));
        id
    }

    pub fn root(&self) -> &KdNode<T, B> {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&KdNode<T, B>> {
        self.nodes.get(id)
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[KdNode<T, B>] {
        &self.nodes
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Root boundary
    pub fn aabb(&self) -> &B {
        &self.nodes[ROOT].aabb
    }

    /// Every item with the depth of the node holding it (root = 1),
    /// depth-first, left before right.
    pub fn items_with_depth(&self) -> Vec<(usize, &KdItem<T, B>)> {
        let mut result = Vec::with_capacity(self.num_items);
        let mut stack = vec![(ROOT, 1)];
        while let Some((node_id, depth)) = stack.pop() {
            let node = &self.nodes[node_id];
            result.extend(node.items.iter().map(|item| (depth, item)));
            // Push right first so left is visited first
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
