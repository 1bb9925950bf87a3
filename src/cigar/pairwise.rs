//! Gap statistics of two rows of the same alignment.
//!
//! Columns are classified relative to the first row:
//! - both rows hold a residue: [CigarOp::Match]
//! - only the first row holds a residue: [CigarOp::Deletion]
//! - only the second row holds a residue: [CigarOp::Insertion]
//!
//! Columns where both rows are gaps do not take part.

use crate::alignment::AlignedSequence;
use crate::cigar::{CigarOp, CigarString, is_gap};
use crate::error::BuildError;
use std::collections::BTreeMap;

/// Number of alignment states (`M`, `I`, `D`).
pub const NUM_STATES: usize = CigarOp::ALL.len();

/// Transition counts indexed `[from][to]` by [CigarOp::index].
pub type TransitionMatrix = [[usize; NUM_STATES]; NUM_STATES];

/// Pairwise CIGAR, gap-size histogram and state transition counts of two rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseStats {
    /// Run-length encoding of the column states
    pub cigar: CigarString,
    /// Gap length to number of maximal insertion or deletion runs of that length
    pub gap_sizes: BTreeMap<usize, usize>,
    /// Consecutive state transitions, with an implicit `M` before the first
    /// and after the last column
    pub transitions: TransitionMatrix,
}

impl PairwiseStats {
    /// Computes the statistics of two aligned rows of equal width.
    ///
    /// # Example
    /// ```
    /// use cigartree::cigar::CigarOp;
    /// use cigartree::cigar::pairwise::PairwiseStats;
    ///
    /// let stats = PairwiseStats::from_rows(b"AC-GT", b"A-TGT").unwrap();
    /// assert_eq!(stats.cigar.to_string(), "1M1D1I2M");
    /// assert_eq!(stats.gap_sizes.get(&1), Some(&2));
    /// assert_eq!(stats.transitions[CigarOp::Deletion.index()][CigarOp::Insertion.index()], 1);
    /// ```
    ///
    /// # Returns
    /// `None` if the rows differ in width.
    pub fn from_rows(first: &[u8], second: &[u8]) -> Option<Self> {
        if first.len() != second.len() {
            return None;
        }

        let mut cigar = CigarString::new();
        for (&a, &b) in first.iter().zip(second) {
            let op = match (is_gap(a), is_gap(b)) {
                (true, true) => continue,
                (false, false) => CigarOp::Match,
                (false, true) => CigarOp::Deletion,
                (true, false) => CigarOp::Insertion,
            };
            cigar.push(op, 1);
        }

        let mut gap_sizes = BTreeMap::new();
        for run in cigar.runs() {
            if run.op != CigarOp::Match {
                *gap_sizes.entry(run.len).or_insert(0) += 1;
            }
        }

        let mut transitions = [[0; NUM_STATES]; NUM_STATES];
        let mut previous = CigarOp::Match;
        for run in cigar.runs() {
            transitions[previous.index()][run.op.index()] += 1;
            // Staying within a run
            transitions[run.op.index()][run.op.index()] += run.len - 1;
            previous = run.op;
        }
        transitions[previous.index()][CigarOp::Match.index()] += 1;

        Some(PairwiseStats { cigar, gap_sizes, transitions })
    }

    /// Total number of transitions counted; one more than the number of compared columns.
    pub fn num_transitions(&self) -> usize {
        self.transitions.iter().flatten().sum()
    }
}

/// Computes [PairwiseStats] of two named rows.
///
/// # Errors
/// [BuildError::MalformedAlignment] naming the second row if the widths differ.
pub fn pairwise_stats(first: &AlignedSequence, second: &AlignedSequence) -> Result<PairwiseStats, BuildError> {
    PairwiseStats::from_rows(first.sequence.as_bytes(), second.sequence.as_bytes()).ok_or_else(|| {
        BuildError::MalformedAlignment {
            name: second.name.clone(),
            expected: first.width(),
            found: second.width(),
        }
    })
}

/// Pairwise CIGAR of two aligned rows of equal width, `None` if the widths differ.
pub fn pairwise_cigar(first: &[u8], second: &[u8]) -> Option<CigarString> {
    PairwiseStats::from_rows(first, second).map(|stats| stats.cigar)
}
