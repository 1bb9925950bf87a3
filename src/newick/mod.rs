//! Newick format parser for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse a Newick string into a
//! [`PhyloTree`].
//!
//! # Quick API
//! * [`parse_file`] - parses the single tree of a file
//! * [`parse_str`] - parses a single Newick string
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels may be single-quoted, with `''` as an escaped quote
//! * Comments are square brackets and can occur anywhere where whitespace is allowed

mod defs;
mod parser;

pub use self::parser::NewickParser;

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a file containing exactly one Newick tree.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [`PhyloTree`] - Tree parsed from the file
/// * [`ParsingError`] - If file reading fails or Newick format is invalid
///
/// # Example
/// ```ignore
/// use cigartree::newick::parse_file;
///
/// let tree = parse_file("family.nwk")?;
/// println!("Parsed tree with {} leaves", tree.num_leaves());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_file(path)?;
    NewickParser::new().parse_single(&mut byte_parser)
}

/// Parses a single Newick string to obtain a [`PhyloTree`].
///
/// # Example
/// ```
/// use cigartree::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_single(&mut byte_parser)
}
