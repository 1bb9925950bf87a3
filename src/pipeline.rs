//! One publication job: parse tree and alignment, build, report, publish.

use crate::alignment::{self, AlignmentFormat};
use crate::cigar_tree::{CigarTree, CigarTreeBuilder, CigarTreeOptions};
use crate::error::Error;
use crate::newick;
use crate::publish::{Acknowledgement, Publisher};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Inputs of one run of the pipeline.
///
/// # Example
/// ```no_run
/// use cigartree::pipeline::Job;
/// use cigartree::publish::HttpPublisher;
///
/// let job = Job::new("PF00001", "family.nwk", "family.fasta");
/// let _acknowledgement = job.run(&HttpPublisher::default(), &mut std::io::stderr())?;
/// # Ok::<(), cigartree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Job {
    pub family_id: String,
    pub tree_path: PathBuf,
    pub alignment_path: PathBuf,
    pub format: AlignmentFormat,
    pub options: CigarTreeOptions,
}

impl Job {
    pub fn new(family_id: impl Into<String>, tree_path: impl Into<PathBuf>, alignment_path: impl Into<PathBuf>) -> Self {
        Job {
            family_id: family_id.into(),
            tree_path: tree_path.into(),
            alignment_path: alignment_path.into(),
            format: AlignmentFormat::Auto,
            options: CigarTreeOptions::default(),
        }
    }

    pub fn with_format(mut self, format: AlignmentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_options(mut self, options: CigarTreeOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses both inputs and builds the [CigarTree].
    pub fn build(&self) -> Result<CigarTree, Error> {
        let tree = newick::parse_file(&self.tree_path).map_err(|source| Error::Tree {
            path: self.tree_path.clone(),
            source,
        })?;
        let index = alignment::parse_file(&self.alignment_path, self.format)?;
        info!(
            leaves = tree.num_leaves(),
            sequences = index.len(),
            width = index.width(),
            "parsed inputs"
        );

        Ok(CigarTreeBuilder::new(&index).with_options(self.options).build(&tree)?)
    }

    /// Builds the tree, writes it as indented JSON to `diagnostics`, then
    /// submits it once to `publisher`.
    ///
    /// Nothing is submitted unless the tree was built completely.
    pub fn run<P, W>(&self, publisher: &P, diagnostics: &mut W) -> Result<Acknowledgement, Error>
    where
        P: Publisher + ?Sized,
        W: Write,
    {
        let tree = self.build()?;
        writeln!(diagnostics, "{}", tree.to_json_pretty()?)?;

        let acknowledgement = publisher.submit(&self.family_id, &tree)?;
        info!(family_id = %self.family_id, "submitted cigar tree");
        Ok(acknowledgement)
    }
}
