//! Run-length (CIGAR-style) encoding of aligned sequences.
//!
//! A [CigarString] summarizes, for one row of a multiple-sequence alignment,
//! which columns hold a residue ([CigarOp::Match]) and which hold a gap
//! ([CigarOp::Deletion]). Consecutive columns with the same operation are
//! merged into one [CigarRun]. Residue identity is not recorded, so matches
//! and mismatches are both `M`.
//!
//! [CigarOp::Insertion] does not occur in a single-row encoding; it appears in
//! pairwise encodings of two rows (see [pairwise]) and is accepted when
//! parsing CIGAR text.
//!
//! # Text form
//! SAM-style `<count><op>` pairs, e.g. `2M1D1M`. The empty CIGAR (alignment
//! of width zero) is the empty string.
//!
//! # Example
//! ```
//! use cigartree::cigar::{CigarOp, CigarString};
//!
//! let cigar = CigarString::from_aligned("AC-T");
//! assert_eq!(cigar.to_string(), "2M1D1M");
//! assert_eq!(cigar.width(), 4);
//! assert_eq!(cigar.expand(), vec![CigarOp::Match, CigarOp::Match, CigarOp::Deletion, CigarOp::Match]);
//! assert_eq!(cigar.align("ACT").unwrap(), "AC-T");
//! ```

pub mod pairwise;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters treated as gaps in aligned sequences
pub const GAP_CHARS: &[u8] = b"-.";

/// Gap character used when re-inserting gaps into an ungapped sequence
pub const GAP_CHAR: char = '-';

/// Returns `true` if the alignment character is a gap.
#[inline]
pub fn is_gap(b: u8) -> bool {
    GAP_CHARS.contains(&b)
}

// =#========================================================================#=
// CIGAR OP
// =#========================================================================#=
/// Alignment operation of a run of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// Residue present (match or mismatch, not distinguished)
    Match,
    /// Residue present only in the second row of a pairwise alignment
    Insertion,
    /// Gap present
    Deletion,
}

impl CigarOp {
    /// All operations, in the order used to index transition matrices.
    pub const ALL: [CigarOp; 3] = [CigarOp::Match, CigarOp::Insertion, CigarOp::Deletion];

    /// Returns the SAM character of this operation.
    pub fn as_char(self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Insertion => 'I',
            CigarOp::Deletion => 'D',
        }
    }

    /// Returns the operation for a SAM character, if it is one of `M`, `I`, `D`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(CigarOp::Match),
            'I' => Some(CigarOp::Insertion),
            'D' => Some(CigarOp::Deletion),
            _ => None,
        }
    }

    /// Index of this operation in [CigarOp::ALL].
    pub fn index(self) -> usize {
        match self {
            CigarOp::Match => 0,
            CigarOp::Insertion => 1,
            CigarOp::Deletion => 2,
        }
    }

    /// Classifies one alignment column of a single row.
    #[inline]
    pub fn classify(b: u8) -> Self {
        if is_gap(b) { CigarOp::Deletion } else { CigarOp::Match }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =#========================================================================#=
// CIGAR RUN
// =#========================================================================#=
/// A run of `len` consecutive alignment columns sharing the operation `op`.
///
/// # Invariants
/// - `len` is positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarRun {
    pub op: CigarOp,
    pub len: usize,
}

impl CigarRun {
    /// Creates a new run.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn new(op: CigarOp, len: usize) -> Self {
        assert!(len > 0, "CIGAR run length must be positive");
        CigarRun { op, len }
    }
}

// =#========================================================================#=
// CIGAR STRING
// =#========================================================================#=
/// Ordered sequence of [CigarRun]s.
///
/// # Invariants
/// - Every run has positive length
/// - Adjacent runs have different operations
/// - For a single-row encoding, the run lengths sum to the alignment width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CigarString {
    runs: Vec<CigarRun>,
}

impl CigarString {
    /// Creates an empty CIGAR.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes one aligned row: residues become `M`, gaps (`-` or `.`) become `D`.
    ///
    /// The gap/residue classification is case-insensitive by construction.
    pub fn from_aligned<S: AsRef<[u8]>>(aligned: S) -> Self {
        let mut cigar = CigarString::new();
        for &b in aligned.as_ref() {
            cigar.push(CigarOp::classify(b), 1);
        }
        cigar
    }

    /// Appends `len` columns of `op`, merging with the last run if it has the same operation.
    ///
    /// Zero-length pushes are ignored.
    pub fn push(&mut self, op: CigarOp, len: usize) {
        if len == 0 {
            return;
        }
        if let Some(last) = self.runs.last_mut()
            && last.op == op
        {
            last.len += len;
            return;
        }
        self.runs.push(CigarRun { op, len });
    }

    /// Returns the runs of this CIGAR.
    pub fn runs(&self) -> &[CigarRun] {
        &self.runs
    }

    /// Returns the number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if there are no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the number of alignment columns covered, i.e. the sum of run lengths.
    pub fn width(&self) -> usize {
        self.runs.iter().map(|run| run.len).sum()
    }

    /// Returns the number of columns with operation `op`.
    pub fn count(&self, op: CigarOp) -> usize {
        self.runs.iter().filter(|run| run.op == op).map(|run| run.len).sum()
    }

    /// Expands the runs back into one operation per alignment column.
    pub fn expand(&self) -> Vec<CigarOp> {
        let mut ops = Vec::with_capacity(self.width());
        for run in &self.runs {
            ops.extend(std::iter::repeat_n(run.op, run.len));
        }
        ops
    }

    /// Rebuilds an aligned row from the ungapped residues of a sequence.
    ///
    /// Residues are placed on `M` (and `I`) columns, [GAP_CHAR] on `D` columns.
    ///
    /// # Returns
    /// `None` if the number of residues does not match the residue columns of this CIGAR.
    pub fn align(&self, residues: &str) -> Option<String> {
        let mut chars = residues.chars();
        let mut aligned = String::with_capacity(self.width());
        for run in &self.runs {
            match run.op {
                CigarOp::Deletion => aligned.extend(std::iter::repeat_n(GAP_CHAR, run.len)),
                CigarOp::Match | CigarOp::Insertion => {
                    for _ in 0..run.len {
                        aligned.push(chars.next()?);
                    }
                }
            }
        }

        if chars.next().is_some() {
            return None;
        }
        Some(aligned)
    }
}

impl fmt::Display for CigarString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for run in &self.runs {
            write!(f, "{}{}", run.len, run.op)?;
        }
        Ok(())
    }
}

/// Errors when parsing CIGAR text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CigarParseError {
    #[error("invalid CIGAR operation '{0}'")]
    InvalidOperation(char),
    #[error("CIGAR operation '{0}' without count")]
    MissingCount(char),
    #[error("CIGAR run with zero length")]
    ZeroLength,
    #[error("CIGAR count too large")]
    CountOverflow,
    #[error("CIGAR ends with a count but no operation")]
    TrailingCount,
}

impl FromStr for CigarString {
    type Err = CigarParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cigar = CigarString::new();
        let mut count: Option<usize> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let current = count.unwrap_or(0);
                let next = current
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit as usize))
                    .ok_or(CigarParseError::CountOverflow)?;
                count = Some(next);
                continue;
            }

            let op = CigarOp::from_char(c).ok_or(CigarParseError::InvalidOperation(c))?;
            match count.take() {
                None => return Err(CigarParseError::MissingCount(c)),
                Some(0) => return Err(CigarParseError::ZeroLength),
                Some(len) => cigar.push(op, len),
            }
        }

        if count.is_some() {
            return Err(CigarParseError::TrailingCount);
        }
        Ok(cigar)
    }
}

impl Serialize for CigarString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CigarString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
