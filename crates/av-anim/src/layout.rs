//! Implicit binary-tree layout from an array snapshot
//!
//! A complete binary tree represented as a flat array using index
//! arithmetic, standard for binary heaps:
//!
//! ```text
//!               _____[0]_____
//!              /             \
//!           [1]               [2]
//!         /     \           /     \
//!      [3]       [4]     [5]       [6]
//!     /   \     /
//!   [7]   [8] [9]
//! ```

use av_data::CellValue;

/// Child indices of node `i` in an implicit complete binary tree of `n` nodes
pub fn child_indices(i: usize, n: usize) -> (Option<usize>, Option<usize>) {
    let left = 2 * i + 1;
    let right = 2 * i + 2;
    ((left < n).then_some(left), (right < n).then_some(right))
}

/// Parent index of node `i`; `None` for the root
pub fn parent_index(i: usize) -> Option<usize> {
    (i > 0).then(|| (i - 1) / 2)
}

/// A layout node mirroring one array position
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub index: usize,
    pub value: CellValue,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Binary-tree layout mirrored from an array snapshot
///
/// Isomorphic to the array: node `i` mirrors array position `i`. The
/// layout carries no state beyond the mirrored values and is rebuilt from
/// scratch on every submission switch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeapLayout {
    nodes: Vec<LayoutNode>,
}

impl HeapLayout {
    /// Build the layout for an array snapshot
    ///
    /// Children are attached to internal nodes only (`i < n / 2`); the
    /// remaining nodes are leaves, per the shape of a binary heap.
    pub fn from_values(values: &[CellValue]) -> Self {
        let n = values.len();
        let mut nodes: Vec<LayoutNode> = values
            .iter()
            .enumerate()
            .map(|(index, value)| LayoutNode {
                index,
                value: value.clone(),
                left: None,
                right: None,
            })
            .collect();

        for i in 0..n / 2 {
            let (left, right) = child_indices(i, n);
            nodes[i].left = left;
            nodes[i].right = right;
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node mirroring the given array position
    pub fn node(&self, index: usize) -> Option<&LayoutNode> {
        self.nodes.get(index)
    }

    /// The root node, holding the first array value
    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }
}
