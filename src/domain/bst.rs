use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::DriverAggregate;

/// Node of the points tree; children are arena indices.
#[derive(Debug)]
pub struct TreeNode {
    pub data: DriverAggregate,
    /// Subtree with strictly fewer points
    pub left: Option<Index>,
    /// Subtree with equal or more points
    pub right: Option<Index>,
}

/// Unbalanced binary search tree keyed by driver points.
///
/// Nodes live in a generational arena and are only ever added; the whole
/// tree is dropped and rebuilt rather than edited. Insertion order decides
/// the shape, so already sorted input degenerates into a chain.
#[derive(Debug, Default)]
pub struct PointsTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl PointsTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build a tree by inserting `records` in order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DriverAggregate>) -> Self {
        let mut tree = Self::new();
        for record in records {
            tree.insert(record.clone());
        }
        tree
    }

    /// Insert below the first empty slot; ties go right.
    #[instrument(level = "trace", skip(self, data), fields(points = data.points))]
    pub fn insert(&mut self, data: DriverAggregate) -> Index {
        let points = data.points;
        let node_idx = self.arena.insert(TreeNode {
            data,
            left: None,
            right: None,
        });

        let Some(mut current) = self.root else {
            self.root = Some(node_idx);
            return node_idx;
        };

        loop {
            let node = &mut self.arena[current];
            let slot = if points < node.data.points {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(next) => current = next,
                None => {
                    *slot = Some(node_idx);
                    return node_idx;
                }
            }
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    /// Records in ascending points order.
    #[instrument(level = "debug", skip(self))]
    pub fn in_order(&self) -> Vec<DriverAggregate> {
        self.iter().map(|node| node.data.clone()).collect()
    }

    /// Records highest points first: the in-order sequence reversed.
    pub fn ranking(&self) -> Vec<DriverAggregate> {
        let mut ranking = self.in_order();
        ranking.reverse();
        ranking
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.calculate_depth(root))
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) => {
                let left = node.left.map_or(0, |l| self.calculate_depth(l));
                let right = node.right.map_or(0, |r| self.calculate_depth(r));
                1 + left.max(right)
            }
            None => 0,
        }
    }

    /// Render the tree for the terminal; children are tagged `L`/`R`.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build(tree: &PointsTree, idx: Index, tag: &str) -> Tree<String> {
            let Some(node) = tree.get_node(idx) else {
                return Tree::new(format!("{tag}?"));
            };
            let label = format!("{tag}{} ({:.1})", node.data.name, node.data.points);
            let leaves: Vec<_> = [(node.left, "L: "), (node.right, "R: ")]
                .into_iter()
                .filter_map(|(child, tag)| child.map(|c| build(tree, c, tag)))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        match self.root {
            Some(root) => build(self, root, ""),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Left, node, right traversal driven by an explicit stack.
pub struct InOrderIterator<'a> {
    tree: &'a PointsTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a PointsTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.get_node(idx).and_then(|n| n.left);
        }
        let idx = self.stack.pop()?;
        let node = self.tree.get_node(idx)?;
        self.current = node.right;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(name: &str, points: f64) -> DriverAggregate {
        DriverAggregate::new(0, name, points, 0.0, 1)
    }

    #[test]
    fn given_empty_tree_when_traversing_then_nothing() {
        let tree = PointsTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.in_order().is_empty());
    }

    #[test]
    fn given_equal_points_when_inserting_then_tie_goes_right() {
        let mut tree = PointsTree::new();
        let root = tree.insert(driver("first", 10.0));
        let tie = tree.insert(driver("second", 10.0));
        let node = tree.get_node(root).unwrap();
        assert_eq!(node.right, Some(tie));
        assert_eq!(node.left, None);
    }

    #[test]
    fn given_tree_when_rendering_then_root_label_first() {
        let tree = PointsTree::from_records(&[driver("Prost", 5.0), driver("Senna", 9.0)]);
        let rendered = tree.to_tree_string().to_string();
        assert!(rendered.starts_with("Prost (5.0)"));
        assert!(rendered.contains("R: Senna (9.0)"));
    }
}
