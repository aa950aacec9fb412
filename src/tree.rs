//! Tree entities: [`Node`] and the owning [`KdTree`] handle.
//!
//! Every node exclusively owns its children, so the tree is a strict
//! forest: releasing the root releases everything, and no aliasing exists
//! between sibling subtrees. Nodes are created exactly once during a build
//! pass and are immutable afterwards.

use crate::types::{Axis, Coord, Point, Rank};
use std::fmt;

/// Indentation added per tree level by the rotated renderer.
const LEVEL_INDENT: usize = 8;

/// One node of the kd-tree.
///
/// Internal nodes carry the axis their children were split on and the
/// median point of their range; leaves carry the sole remaining point and
/// no axis. `owner` identifies the group participant that built the node
/// and is populated only when the group tier is active.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) axis: Option<Axis>,
    pub(crate) point: Point<T>,
    pub(crate) left: Option<Box<Node<T>>>,
    pub(crate) right: Option<Box<Node<T>>>,
    pub(crate) owner: Option<Rank>,
}

impl<T: Coord> Node<T> {
    /// Split axis used for this node's children; `None` for leaves.
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// The node's own representative point.
    pub fn point(&self) -> Point<T> {
        self.point
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Rank of the participant that built this node, when the group tier
    /// was active.
    pub fn owner(&self) -> Option<Rank> {
        self.owner
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of points in this subtree (one per node).
    pub fn cardinality(&self) -> usize {
        let mut count = 0;
        self.for_each(&mut |_| count += 1);
        count
    }

    /// Height of this subtree in levels; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.depth());
        let right = self.right.as_ref().map_or(0, |n| n.depth());
        1 + left.max(right)
    }

    /// Pre-order visit of every node in the subtree.
    pub fn for_each(&self, visit: &mut impl FnMut(&Node<T>)) {
        visit(self);
        if let Some(left) = &self.left {
            left.for_each(visit);
        }
        if let Some(right) = &self.right {
            right.for_each(visit);
        }
    }

    /// Structural equality: same axis choices, same points, same children.
    /// Owner tags are ignored, so trees built on different tiers compare
    /// equal when their shapes match.
    pub fn same_shape(&self, other: &Node<T>) -> bool {
        if self.axis != other.axis || self.point != other.point {
            return false;
        }
        match (&self.left, &other.left) {
            (Some(a), Some(b)) if a.same_shape(b) => {}
            (None, None) => {}
            _ => return false,
        }
        match (&self.right, &other.right) {
            (Some(a), Some(b)) => a.same_shape(b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Stamp `rank` on every node of the subtree.
    pub(crate) fn tag_owner(&mut self, rank: Rank) {
        self.owner = Some(rank);
        if let Some(left) = &mut self.left {
            left.tag_owner(rank);
        }
        if let Some(right) = &mut self.right {
            right.tag_owner(rank);
        }
    }
}

impl<T: Coord + fmt::Display> Node<T> {
    fn render(&self, pad: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(right) = &self.right {
            right.render(pad + LEVEL_INDENT, f)?;
        }
        write!(f, "{:pad$}", "")?;
        match self.axis {
            Some(axis) => write!(f, "{} {}", axis, self.point)?,
            None => write!(f, "leaf {}", self.point)?,
        }
        if let Some(rank) = self.owner {
            write!(f, " #{rank}")?;
        }
        writeln!(f)?;
        if let Some(left) = &self.left {
            left.render(pad + LEVEL_INDENT, f)?;
        }
        Ok(())
    }
}

/// Rotated rendering: the right subtree above, the left below, indentation
/// growing with depth.
impl<T: Coord + fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(0, f)
    }
}

/// A completed kd-tree. The single handle owning the whole structure.
#[derive(Debug, Clone)]
pub struct KdTree<T> {
    root: Node<T>,
}

impl<T: Coord> KdTree<T> {
    pub(crate) fn new(root: Node<T>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Total number of points in the tree.
    pub fn cardinality(&self) -> usize {
        self.root.cardinality()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn same_shape(&self, other: &KdTree<T>) -> bool {
        self.root.same_shape(&other.root)
    }
}

impl<T: Coord + fmt::Display> fmt::Display for KdTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
