//! Stockholm parsing.

use crate::alignment::AlignedSequence;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use std::collections::HashMap;
use tracing::debug;

/// Header that starts every Stockholm file (followed by a version)
pub(crate) const STOCKHOLM_HEADER: &str = "# STOCKHOLM";

/// Terminator of a Stockholm alignment
const STOCKHOLM_END: &str = "//";

/// Parser for Stockholm alignments.
///
/// Reads the first alignment of the input:
/// * `# STOCKHOLM 1.0` header line
/// * markup (`#=GF`, `#=GS`, `#=GR`, `#=GC`) and other `#` lines are skipped
/// * `name sequence` lines; a name seen again (interleaved blocks) extends its sequence
/// * `//` ends the alignment, anything after it is ignored
#[derive(Debug, Default)]
pub struct StockholmParser;

impl StockholmParser {
    pub fn new() -> Self {
        StockholmParser
    }

    /// Parses the alignment, sequences in order of first appearance.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the header is missing or a line has a name
    /// but no sequence.
    pub fn parse_all<B: ByteSource>(&self, parser: &mut ByteParser<B>) -> Result<Vec<AlignedSequence>, ParsingError> {
        parser.skip_whitespace();
        if !parser.peek_is_word(STOCKHOLM_HEADER) {
            return Err(ParsingError::invalid_stockholm(
                parser,
                format!("Missing '{STOCKHOLM_HEADER}' header"),
            ));
        }
        parser.parse_line();

        let mut names: Vec<String> = Vec::new();
        let mut rows: HashMap<String, String> = HashMap::new();
        let mut terminated = false;

        while !parser.is_eof() {
            let line = parser.parse_line();
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == STOCKHOLM_END {
                terminated = true;
                break;
            }

            let mut fields = line.split_whitespace();
            let (Some(name), Some(sequence)) = (fields.next(), fields.next()) else {
                return Err(ParsingError::invalid_stockholm(
                    parser,
                    format!("Missing sequence after name '{line}'"),
                ));
            };
            if fields.next().is_some() {
                return Err(ParsingError::invalid_stockholm(
                    parser,
                    format!("Unexpected whitespace in sequence of '{name}'"),
                ));
            }

            match rows.get_mut(name) {
                Some(row) => row.push_str(sequence),
                None => {
                    names.push(name.to_string());
                    rows.insert(name.to_string(), sequence.to_string());
                }
            }
        }

        if !terminated {
            debug!("Stockholm alignment without '{STOCKHOLM_END}' terminator");
        }

        Ok(names
            .into_iter()
            .map(|name| {
                let sequence = rows.remove(&name).unwrap_or_default();
                AlignedSequence::new(name, sequence)
            })
            .collect())
    }
}
