//! Error types of the cigar tree pipeline.
//!
//! * [BuildError] - assembling a [SequenceIndex](crate::alignment::SequenceIndex)
//!   or a [CigarTree](crate::cigar_tree::CigarTree) failed
//! * [Error] - any failure of the library entry points; wraps
//!   [ParsingError], [BuildError] and [PublishError]

use crate::parser::ParsingError;
use crate::publish::PublishError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while combining a tree and an alignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A leaf of the tree has no entry in the alignment
    #[error("no sequence for leaf '{name}' in alignment")]
    MissingSequence { name: String },

    /// An alignment entry differs in width from the others
    #[error("sequence '{name}' has width {found}, expected {expected}")]
    MalformedAlignment { name: String, expected: usize, found: usize },

    /// Two leaves of the tree share a name
    #[error("leaf name '{name}' occurs more than once in tree")]
    DuplicateLeaf { name: String },

    /// Two alignment entries share a name
    #[error("sequence name '{name}' occurs more than once in alignment")]
    DuplicateSequence { name: String },

    /// An alignment entry contains a byte outside ASCII, so its columns cannot be counted as bytes
    #[error("sequence '{name}' contains a non-ASCII character")]
    NonAsciiSequence { name: String },

    /// The tree has no root
    #[error("tree has no root")]
    EmptyTree,

    /// The tree has a root but is not one connected, consistently linked tree
    #[error("tree structure is invalid")]
    InvalidTree,
}

/// Any failure of the library entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid tree in {}", path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: ParsingError,
    },

    #[error("invalid alignment in {}", path.display())]
    Alignment {
        path: PathBuf,
        #[source]
        source: ParsingError,
    },

    #[error(transparent)]
    Parse(#[from] ParsingError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("failed to encode cigar tree")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write diagnostic output")]
    Diagnostic(#[from] std::io::Error),
}

impl Error {
    /// Returns the [BuildError], if this is one.
    pub fn as_build_error(&self) -> Option<&BuildError> {
        match self {
            Error::Build(err) => Some(err),
            _ => None,
        }
    }
}
