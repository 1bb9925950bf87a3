//! Multiple sequence alignments.
//!
//! A parsed alignment is a list of [AlignedSequence]s, which is assembled into
//! a [SequenceIndex]: name to aligned row lookup with an explicit common
//! width.
//!
//! # Quick API
//! * [`parse_file`] - parses an alignment file into a [SequenceIndex]
//! * [`parse_str`] - parses alignment text into a [SequenceIndex]
//!
//! # Formats
//! * Aligned FASTA ([FastaParser])
//! * Stockholm ([StockholmParser])
//!
//! With [AlignmentFormat::Auto], the format is detected from the first
//! non-blank content: `# STOCKHOLM` or `>`.

mod fasta;
mod stockholm;

pub use self::fasta::FastaParser;
pub use self::stockholm::StockholmParser;

use crate::cigar::pairwise::{PairwiseStats, pairwise_stats};
use crate::error::{BuildError, Error};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use self::stockholm::STOCKHOLM_HEADER;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// =#========================================================================#=
// ALIGNED SEQUENCE
// =#========================================================================#=
/// One named row of an alignment, gaps included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub name: String,
    pub sequence: String,
}

impl AlignedSequence {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        AlignedSequence {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of alignment columns of this row (one per byte; rows are ASCII).
    pub fn width(&self) -> usize {
        self.sequence.len()
    }
}

// =#========================================================================#=
// SEQUENCE INDEX
// =#========================================================================#=
/// Lookup from sequence name to aligned row.
///
/// # Invariants
/// - Names are unique
/// - Rows are ASCII
/// - Every row has exactly [`width()`](Self::width) columns
///
/// # Example
/// ```
/// use cigartree::alignment::{AlignedSequence, SequenceIndex};
///
/// let index = SequenceIndex::from_sequences(vec![
///     AlignedSequence::new("A", "AC-T"),
///     AlignedSequence::new("B", "ACGT"),
/// ])
/// .unwrap();
///
/// assert_eq!(index.width(), 4);
/// assert_eq!(index.get("A"), Some("AC-T"));
/// assert_eq!(index.get("C"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceIndex {
    sequences: Vec<AlignedSequence>,
    by_name: HashMap<String, usize>,
    width: usize,
}

impl SequenceIndex {
    /// Assembles an index, validating names and widths.
    ///
    /// The width is taken from the first sequence; an empty list has width zero.
    ///
    /// # Errors
    /// * [BuildError::NonAsciiSequence] if a row contains a non-ASCII character
    /// * [BuildError::DuplicateSequence] if a name occurs twice
    /// * [BuildError::MalformedAlignment] if a row differs in width from the first
    pub fn from_sequences(sequences: Vec<AlignedSequence>) -> Result<Self, BuildError> {
        let width = sequences.first().map_or(0, AlignedSequence::width);
        let mut by_name = HashMap::with_capacity(sequences.len());

        for (position, sequence) in sequences.iter().enumerate() {
            if !sequence.sequence.is_ascii() {
                return Err(BuildError::NonAsciiSequence {
                    name: sequence.name.clone(),
                });
            }
            if sequence.width() != width {
                return Err(BuildError::MalformedAlignment {
                    name: sequence.name.clone(),
                    expected: width,
                    found: sequence.width(),
                });
            }
            if by_name.insert(sequence.name.clone(), position).is_some() {
                return Err(BuildError::DuplicateSequence {
                    name: sequence.name.clone(),
                });
            }
        }

        Ok(SequenceIndex { sequences, by_name, width })
    }

    /// Common number of alignment columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns the aligned row of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|entry| entry.sequence.as_str())
    }

    /// Returns the [AlignedSequence] of `name`, if present.
    pub fn entry(&self, name: &str) -> Option<&AlignedSequence> {
        self.by_name.get(name).map(|&position| &self.sequences[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates over the sequence names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(|entry| entry.name.as_str())
    }

    /// Iterates over the sequences in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, AlignedSequence> {
        self.sequences.iter()
    }

    /// Gap statistics of the rows `first` and `second`.
    ///
    /// # Errors
    /// [BuildError::MissingSequence] if either name is not in the index.
    pub fn pairwise(&self, first: &str, second: &str) -> Result<PairwiseStats, BuildError> {
        let lookup = |name: &str| {
            self.entry(name)
                .ok_or_else(|| BuildError::MissingSequence { name: name.to_string() })
        };
        pairwise_stats(lookup(first)?, lookup(second)?)
    }
}

impl<'a> IntoIterator for &'a SequenceIndex {
    type Item = &'a AlignedSequence;
    type IntoIter = std::slice::Iter<'a, AlignedSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =#========================================================================#=
// FORMAT
// =#========================================================================#=
/// Alignment file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignmentFormat {
    /// Detect from content
    #[default]
    Auto,
    Fasta,
    Stockholm,
}

impl AlignmentFormat {
    /// Detects the format from the first non-blank content, without consuming it.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the content starts with neither `# STOCKHOLM` nor `>`.
    pub fn detect<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<Self, ParsingError> {
        parser.skip_whitespace();
        if parser.peek_is_word(STOCKHOLM_HEADER) {
            Ok(AlignmentFormat::Stockholm)
        } else if parser.peek_is(b'>') {
            Ok(AlignmentFormat::Fasta)
        } else {
            Err(ParsingError::unknown_alignment_format(parser))
        }
    }

    /// Parses all sequences in this format, detecting it first if `Auto`.
    pub fn parse<B: ByteSource>(self, parser: &mut ByteParser<B>) -> Result<Vec<AlignedSequence>, ParsingError> {
        let format = match self {
            AlignmentFormat::Auto => Self::detect(parser)?,
            explicit => explicit,
        };

        match format {
            AlignmentFormat::Stockholm => StockholmParser::new().parse_all(parser),
            _ => FastaParser::new().parse_all(parser),
        }
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AlignmentFormat::Auto => "auto",
            AlignmentFormat::Fasta => "fasta",
            AlignmentFormat::Stockholm => "stockholm",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses an alignment file and assembles its [SequenceIndex].
///
/// # Example
/// ```ignore
/// use cigartree::alignment::{parse_file, AlignmentFormat};
///
/// let index = parse_file("family.fasta", AlignmentFormat::Auto)?;
/// println!("{} sequences of width {}", index.len(), index.width());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, format: AlignmentFormat) -> Result<SequenceIndex, Error> {
    let path = path.as_ref();
    let sequences = ByteParser::for_file(path)
        .and_then(|mut parser| format.parse(&mut parser))
        .map_err(|source| Error::Alignment {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SequenceIndex::from_sequences(sequences)?)
}

/// Parses alignment text and assembles its [SequenceIndex].
///
/// # Example
/// ```
/// use cigartree::alignment::{parse_str, AlignmentFormat};
///
/// let index = parse_str(">A\nAC-T\n>B\nACGT\n", AlignmentFormat::Auto).unwrap();
/// assert_eq!(index.names().collect::<Vec<_>>(), vec!["A", "B"]);
/// ```
pub fn parse_str<S: AsRef<str>>(text: S, format: AlignmentFormat) -> Result<SequenceIndex, Error> {
    let mut parser = ByteParser::for_str(text.as_ref());
    let sequences = format.parse(&mut parser)?;
    Ok(SequenceIndex::from_sequences(sequences)?)
}
