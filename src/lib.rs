//! Cigartree merges a phylogenetic tree and the multiple sequence alignment
//! of its leaves into a single "cigar tree", and publishes it to a history
//! store.
//!
//! Each leaf of the cigar tree carries a CIGAR string: a run-length summary
//! of which alignment columns hold a residue (`M`) or a gap (`D`). Together
//! with the ungapped sequences, it recovers the full alignment row.
//! Core functionality provided:
//! - Newick: Parse a single (multifurcating) tree into a [PhyloTree].
//! - Alignment: Parse aligned FASTA or Stockholm into a [SequenceIndex],
//!   checking that all rows share one width.
//! - Cigar tree: Build a [CigarTree] of the same shape as the input tree,
//!   optionally lowercasing or omitting the attached sequences.
//! - Publish: Submit the JSON document through a [Publisher], e.g. the
//!   [HttpPublisher](crate::publish::HttpPublisher).
//! - Pairwise statistics: CIGAR, gap sizes and state transitions of two rows,
//!   see [crate::cigar::pairwise].
//!
//! # Usage patterns
//! 1. Quick functions below cover the common path with default settings.
//! 2. [Job](crate::pipeline::Job) runs the full parse, build and publish
//!    sequence, as the `cigartree` binary does.
//!
//! ## Example
//! ```
//! use cigartree::{build_cigar_tree, parse_alignment_str, parse_newick_str};
//! use cigartree::cigar_tree::CigarTreeOptions;
//!
//! let tree = parse_newick_str("(A:1,B:1);").unwrap();
//! let index = parse_alignment_str(">A\nAC-T\n>B\nACGT\n").unwrap();
//! let cigar_tree = build_cigar_tree(&tree, &index, CigarTreeOptions::default()).unwrap();
//!
//! assert_eq!(
//!     cigar_tree.to_json().unwrap(),
//!     r#"{"child":[{"name":"A","cigar":"2M1D1M","seq":"AC-T","distance":1.0},{"name":"B","cigar":"4M","seq":"ACGT","distance":1.0}]}"#
//! );
//! ```

pub mod alignment;
pub mod cigar;
pub mod cigar_tree;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;
pub mod publish;

pub use crate::error::{BuildError, Error};

use crate::alignment::{AlignmentFormat, SequenceIndex};
use crate::cigar_tree::{CigarTree, CigarTreeBuilder, CigarTreeOptions};
use crate::model::PhyloTree;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a single Newick string using default settings.
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing exactly one Newick tree.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    newick::parse_file(path)
}

// ============================================================================
// Quick Alignment API
// ============================================================================
/// Parse alignment text, detecting FASTA or Stockholm.
pub fn parse_alignment_str<S: AsRef<str>>(text: S) -> Result<SequenceIndex, Error> {
    alignment::parse_str(text, AlignmentFormat::Auto)
}

/// Parse an alignment file, detecting FASTA or Stockholm.
pub fn parse_alignment_file<P: AsRef<Path>>(path: P) -> Result<SequenceIndex, Error> {
    alignment::parse_file(path, AlignmentFormat::Auto)
}

// ============================================================================
// Quick Build API
// ============================================================================
/// Build the [CigarTree] of `tree` against `index`.
///
/// See [CigarTreeBuilder] for details.
pub fn build_cigar_tree(
    tree: &PhyloTree,
    index: &SequenceIndex,
    options: CigarTreeOptions,
) -> Result<CigarTree, BuildError> {
    CigarTreeBuilder::new(index).with_options(options).build(tree)
}
