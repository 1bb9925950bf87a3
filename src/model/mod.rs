//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either `Internal` or `Leaf`, referenced by
//! [VertexIndex]. Unlike strictly binary tree models, internal vertices keep an
//! ordered list of any number of children, since the CIGAR tree built from a
//! [PhyloTree] must reproduce its exact shape.
//!
//! # Building trees
//! Trees are constructed bottom-up, typically by the
//! [NewickParser](crate::newick::NewickParser).

pub mod tree;
pub mod vertex;

pub use tree::PhyloTree;
pub use tree::VertexIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
