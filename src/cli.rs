use cigartree::alignment::AlignmentFormat;
use cigartree::cigar_tree::CigarTreeOptions;
use cigartree::publish::DEFAULT_BASE_URL;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cigartree",
    about = "Annotate a family tree with the CIGAR strings of its alignment and publish it",
    version
)]
pub struct Args {
    /// Family identifier the tree is stored under
    pub family_id: String,

    /// Tree of the family (Newick)
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Alignment of the leaf sequences (FASTA/Stockholm)
    #[arg(value_name = "ALIGNMENT")]
    pub alignment: PathBuf,

    /// Lowercase the sequences attached to leaves
    #[arg(long)]
    pub lowercase: bool,

    /// Leave sequences out, keeping only CIGAR strings
    #[arg(long)]
    pub omit_seqs: bool,

    /// Base address of the history store
    #[arg(long, env = "CIGARTREE_BASE_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,

    /// Alignment format
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Build and print the tree without contacting the store
    #[arg(long)]
    pub dry_run: bool,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn options(&self) -> CigarTreeOptions {
        let mut options = CigarTreeOptions::default();
        if self.lowercase {
            options = options.with_lowercase();
        }
        if self.omit_seqs {
            options = options.without_sequences();
        }
        options
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Auto,
    Fasta,
    Stockholm,
}

impl From<FormatArg> for AlignmentFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Auto => AlignmentFormat::Auto,
            FormatArg::Fasta => AlignmentFormat::Fasta,
            FormatArg::Stockholm => AlignmentFormat::Stockholm,
        }
    }
}
