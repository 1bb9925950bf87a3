//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted phylogenetic tree.
///
/// A vertex can be either:
/// - **Internal**: Has an ordered list of children, maybe a label, might have branch_length
/// - **Leaf**: Has no children, has a label, might have branch_length
///
/// The root is the unique vertex without parent. It is usually internal, but
/// a tree consisting of a single leaf has a leaf as root.
///
/// # Invariants
/// - `index` is the index in the arena
/// - `branch_length` is non-negative (enforced); might not be set
/// - `parent` is `None` only for the root (and during construction)
/// - Children are kept in the order in which they appear in the source text
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Internal vertex (has children, optional label)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex, `None` for the root
        parent: Option<VertexIndex>,
        /// Indices of the child vertices, in source order
        children: Vec<VertexIndex>,
        /// Optional label of the internal vertex (e.g. clade name)
        label: Option<String>,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (has label, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex, `None` if the leaf is the root
        parent: Option<VertexIndex>,
        /// Name of the leaf, matching a sequence in the alignment
        label: String,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new internal vertex without parent set.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Ordered child indices
    /// * `label` - Optional label of the vertex
    /// * `branch_length` - Distance to parent node (non-negative)
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: None,
            children,
            label,
            branch_length,
        }
    }

    /// Creates a new leaf vertex without parent set.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `label` - Name of this leaf
    /// * `branch_length` - Distance to parent node (non-negative)
    pub fn new_leaf(index: VertexIndex, label: String, branch_length: Option<BranchLength>) -> Self {
        Vertex::Leaf {
            index,
            parent: None,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Internal { index, .. } | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns the label of a leaf, or the optional label of an internal vertex.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Internal { label, .. } => label.as_deref(),
            Vertex::Leaf { label, .. } => Some(label),
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex (including an internal root).
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_index().is_none()
    }

    /// Returns the children of an internal vertex; empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent,
        }
    }

    /// Sets the parent of this vertex.
    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = Some(parent),
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        match Self::try_new(length) {
            Ok(branch_length) => branch_length,
            Err(msg) => panic!("{msg}"),
        }
    }

    /// Creates a new branch length, or describes why `length` is not one.
    pub fn try_new(length: f64) -> Result<Self, String> {
        if !length.is_finite() {
            return Err(format!("Branch length must be finite, got {length}"));
        }
        if length < 0.0 {
            return Err(format!("Branch length must be non-negative, got {length}"));
        }
        Ok(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TryFrom<f64> for BranchLength {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        BranchLength::try_new(value)
    }
}

impl From<BranchLength> for f64 {
    fn from(value: BranchLength) -> Self {
        value.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
