//! Aligned FASTA parsing.

use crate::alignment::AlignedSequence;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

/// Parser for aligned FASTA text.
///
/// Each record is a `>name [description]` header followed by any number of
/// sequence lines. The name is the first whitespace-delimited token of the
/// header; whitespace within sequence lines is dropped.
///
/// Names are not checked for uniqueness here, and widths are not compared;
/// both happen when the [SequenceIndex](crate::alignment::SequenceIndex) is assembled.
#[derive(Debug, Default)]
pub struct FastaParser;

impl FastaParser {
    pub fn new() -> Self {
        FastaParser
    }

    /// Parses all records until the end of input, in file order.
    ///
    /// # Errors
    /// Returns a [ParsingError] if sequence data precedes the first header
    /// or if a header has no name.
    pub fn parse_all<B: ByteSource>(&self, parser: &mut ByteParser<B>) -> Result<Vec<AlignedSequence>, ParsingError> {
        let mut sequences = Vec::new();

        loop {
            parser.skip_whitespace();
            if parser.is_eof() {
                break;
            }
            if !parser.consume_if(b'>') {
                return Err(ParsingError::invalid_fasta(
                    parser,
                    "Expected '>' at start of record".to_string(),
                ));
            }

            let header = parser.parse_line();
            let Some(name) = header.split_whitespace().next() else {
                return Err(ParsingError::invalid_fasta(parser, "Empty sequence name".to_string()));
            };
            let name = name.to_string();

            let mut sequence = String::new();
            loop {
                parser.skip_whitespace();
                if parser.is_eof() || parser.peek_is(b'>') {
                    break;
                }
                let line = parser.parse_line();
                sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
            }

            sequences.push(AlignedSequence::new(name, sequence));
        }

        Ok(sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_records() {
        let mut parser = ByteParser::for_str(">a first\nAC-\nT\n\n>b\r\nACGT\r\n");
        let sequences = FastaParser::new().parse_all(&mut parser).unwrap();
        assert_eq!(sequences, vec![AlignedSequence::new("a", "AC-T"), AlignedSequence::new("b", "ACGT")]);
    }

    #[test]
    fn test_record_without_sequence() {
        let mut parser = ByteParser::for_str(">a\n>b\nAC\n");
        let sequences = FastaParser::new().parse_all(&mut parser).unwrap();
        assert_eq!(sequences[0].sequence, "");
        assert_eq!(sequences[1].sequence, "AC");
    }

    #[test]
    fn test_data_before_header() {
        let mut parser = ByteParser::for_str("ACGT\n>a\nACGT\n");
        assert!(FastaParser::new().parse_all(&mut parser).is_err());
    }

    #[test]
    fn test_empty_name() {
        let mut parser = ByteParser::for_str(">  \nACGT\n");
        assert!(FastaParser::new().parse_all(&mut parser).is_err());
    }
}
