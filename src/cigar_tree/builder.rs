//! Assembly of a [CigarTree] from a [PhyloTree] and a [SequenceIndex].

use crate::alignment::SequenceIndex;
use crate::cigar::CigarString;
use crate::cigar_tree::{CigarInternal, CigarLeaf, CigarNode, CigarTree, CigarTreeOptions};
use crate::error::BuildError;
use crate::model::{BranchLength, PhyloTree, Vertex};
use std::collections::HashSet;
use tracing::{debug, info};

/// Builds [CigarTree]s against one [SequenceIndex].
///
/// The tree is walked in post-order (children in source order), so every
/// internal node is assembled from its already built children.
///
/// # Example
/// ```
/// use cigartree::alignment::{parse_str, AlignmentFormat};
/// use cigartree::cigar_tree::{CigarTreeBuilder, CigarTreeOptions};
///
/// let tree = cigartree::newick::parse_str("(A:1,B:1);").unwrap();
/// let index = parse_str(">A\nAC-T\n>B\nACGT\n", AlignmentFormat::Fasta).unwrap();
///
/// let cigar_tree = CigarTreeBuilder::new(&index)
///     .with_options(CigarTreeOptions::default().without_sequences())
///     .build(&tree)
///     .unwrap();
///
/// assert_eq!(cigar_tree.leaf("A").unwrap().cigar.to_string(), "2M1D1M");
/// assert_eq!(cigar_tree.leaf("B").unwrap().cigar.to_string(), "4M");
/// assert_eq!(cigar_tree.leaf("A").unwrap().sequence, None);
/// ```
pub struct CigarTreeBuilder<'a> {
    index: &'a SequenceIndex,
    options: CigarTreeOptions,
}

impl<'a> CigarTreeBuilder<'a> {
    /// Creates a builder with default [CigarTreeOptions].
    pub fn new(index: &'a SequenceIndex) -> Self {
        CigarTreeBuilder {
            index,
            options: CigarTreeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CigarTreeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the [CigarTree] for `tree`.
    ///
    /// # Errors
    /// * [BuildError::DuplicateLeaf] if two leaves share a name
    /// * [BuildError::MissingSequence] if a leaf has no entry in the index
    /// * [BuildError::EmptyTree] if the tree has no root
    /// * [BuildError::InvalidTree] if the tree fails [PhyloTree::is_valid], e.g.
    ///   the root has a parent or some vertex is unreachable from it
    pub fn build(&self, tree: &PhyloTree) -> Result<CigarTree, BuildError> {
        if !tree.is_root_set() {
            return Err(BuildError::EmptyTree);
        }
        if !tree.is_valid() {
            return Err(BuildError::InvalidTree);
        }
        let leaf_names = Self::unique_leaf_names(tree)?;

        // Built subtrees; children of a vertex are the topmost entries when it is reached
        let mut built: Vec<CigarNode> = Vec::with_capacity(tree.num_vertices());
        for vertex in tree.post_order_iter() {
            let node = match vertex {
                Vertex::Leaf { label, branch_length, .. } => {
                    CigarNode::Leaf(self.build_leaf(label, *branch_length)?)
                }
                Vertex::Internal { children, label, branch_length, .. } => {
                    let children = built.split_off(built.len() - children.len());
                    CigarNode::Internal(CigarInternal {
                        name: label.clone(),
                        children,
                        distance: *branch_length,
                    })
                }
            };
            built.push(node);
        }

        let root = built.pop().ok_or(BuildError::EmptyTree)?;

        for name in self.index.names().filter(|name| !leaf_names.contains(name)) {
            debug!(name, "alignment entry not referenced by tree");
        }
        info!(
            leaves = leaf_names.len(),
            width = self.index.width(),
            "built cigar tree"
        );

        Ok(CigarTree::new(root))
    }

    /// Leaf names of `tree`, which must all be distinct.
    fn unique_leaf_names(tree: &PhyloTree) -> Result<HashSet<&str>, BuildError> {
        let mut names = HashSet::with_capacity(tree.num_leaves());
        for name in tree.leaf_labels() {
            if !names.insert(name) {
                return Err(BuildError::DuplicateLeaf { name: name.to_string() });
            }
        }
        Ok(names)
    }

    /// Encodes the row of leaf `name`.
    fn build_leaf(&self, name: &str, distance: Option<BranchLength>) -> Result<CigarLeaf, BuildError> {
        let row = self.index.get(name).ok_or_else(|| BuildError::MissingSequence {
            name: name.to_string(),
        })?;

        let sequence = self.options.include_sequences.then(|| {
            if self.options.normalize_case {
                row.to_ascii_lowercase()
            } else {
                row.to_string()
            }
        });

        Ok(CigarLeaf {
            name: name.to_string(),
            cigar: CigarString::from_aligned(row),
            sequence,
            distance,
        })
    }
}
