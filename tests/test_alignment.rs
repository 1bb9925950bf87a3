use cigartree::alignment::{AlignedSequence, AlignmentFormat, SequenceIndex, parse_file, parse_str};
use cigartree::cigar::CigarOp;
use cigartree::parser::ParsingErrorType;
use cigartree::parser::byte_parser::ByteParser;
use cigartree::{BuildError, Error};
use std::io::Write;
use tempfile::NamedTempFile;

const FASTA: &str = ">A first sequence\nAC-T\n>B\nAC\nGT\n";
const STOCKHOLM: &str = "# STOCKHOLM 1.0\n#=GF ID PF00001\nA AC\nB AC\n\nA -T\nB GT\n//\n";

fn build_error(result: Result<SequenceIndex, Error>) -> BuildError {
    match result {
        Err(Error::Build(err)) => err,
        other => panic!("expected build error, got {other:?}"),
    }
}

fn parse_error_kind(result: Result<SequenceIndex, Error>) -> ParsingErrorType {
    match result {
        Err(Error::Parse(err)) => err.kind().clone(),
        other => panic!("expected parsing error, got {other:?}"),
    }
}

// --- TESTS FORMAT DETECTION ---
#[test]
fn test_detect_format() {
    let mut parser = ByteParser::for_str("\n\n>A\nAC\n");
    assert_eq!(AlignmentFormat::detect(&mut parser).unwrap(), AlignmentFormat::Fasta);

    let mut parser = ByteParser::for_str("# STOCKHOLM 1.0\n");
    assert_eq!(AlignmentFormat::detect(&mut parser).unwrap(), AlignmentFormat::Stockholm);

    let mut parser = ByteParser::for_str("CLUSTAL W\n");
    let err = AlignmentFormat::detect(&mut parser).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnknownAlignmentFormat);
}

#[test]
fn test_fasta_and_stockholm_agree() {
    let fasta = parse_str(FASTA, AlignmentFormat::Auto).unwrap();
    let stockholm = parse_str(STOCKHOLM, AlignmentFormat::Auto).unwrap();

    for index in [&fasta, &stockholm] {
        assert_eq!(index.width(), 4);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("A"), Some("AC-T"));
        assert_eq!(index.get("B"), Some("ACGT"));
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}

#[test]
fn test_explicit_format_mismatch() {
    let kind = parse_error_kind(parse_str(FASTA, AlignmentFormat::Stockholm));
    assert!(matches!(kind, ParsingErrorType::InvalidStockholm(_)));
}

// --- TESTS SEQUENCE INDEX ---
#[test]
fn test_width_mismatch_is_malformed() {
    let err = build_error(parse_str(">A\nAC-T\n>B\nACG\n", AlignmentFormat::Fasta));
    assert_eq!(
        err,
        BuildError::MalformedAlignment {
            name: "B".to_string(),
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn test_duplicate_name() {
    let err = build_error(parse_str(">A\nAC\n>A desc\nGT\n", AlignmentFormat::Fasta));
    assert_eq!(err, BuildError::DuplicateSequence { name: "A".to_string() });
}

#[test]
fn test_empty_alignment() {
    let index = SequenceIndex::from_sequences(Vec::new()).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.width(), 0);
}

#[test]
fn test_pairwise_from_index() {
    let index = SequenceIndex::from_sequences(vec![
        AlignedSequence::new("A", "AC-T-"),
        AlignedSequence::new("B", "A-GT-"),
    ])
    .unwrap();

    let stats = index.pairwise("A", "B").unwrap();
    assert_eq!(stats.cigar.to_string(), "1M1D1I1M");
    assert_eq!(stats.cigar.count(CigarOp::Match), 2);
    assert_eq!(stats.num_transitions(), 5);

    assert_eq!(
        index.pairwise("A", "Z").unwrap_err(),
        BuildError::MissingSequence { name: "Z".to_string() }
    );
}

// --- TESTS FILE PARSING ---
#[test]
fn test_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{STOCKHOLM}").unwrap();

    let index = parse_file(file.path(), AlignmentFormat::Auto).unwrap();
    assert_eq!(index.get("A"), Some("AC-T"));
}

#[test]
fn test_parse_file_error_names_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "ACGT\n").unwrap();

    match parse_file(file.path(), AlignmentFormat::Fasta) {
        Err(Error::Alignment { path, source }) => {
            assert_eq!(path, file.path());
            assert!(matches!(source.kind(), ParsingErrorType::InvalidFasta(_)));
        }
        other => panic!("expected alignment error, got {other:?}"),
    }
}
