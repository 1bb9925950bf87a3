/// Options for building a [CigarTree](super::CigarTree).
///
/// Defaults: sequences are kept as they are in the alignment.
///
/// # Example
/// ```
/// use cigartree::cigar_tree::CigarTreeOptions;
///
/// let options = CigarTreeOptions::default().with_lowercase().without_sequences();
/// assert!(options.normalize_case);
/// assert!(!options.include_sequences);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarTreeOptions {
    /// Lowercase the attached sequences; CIGARs are unaffected
    pub normalize_case: bool,
    /// Attach the aligned sequence to each leaf
    pub include_sequences: bool,
}

impl CigarTreeOptions {
    pub fn with_lowercase(mut self) -> Self {
        self.normalize_case = true;
        self
    }

    pub fn without_sequences(mut self) -> Self {
        self.include_sequences = false;
        self
    }
}

impl Default for CigarTreeOptions {
    fn default() -> Self {
        CigarTreeOptions {
            normalize_case: false,
            include_sequences: true,
        }
    }
}
