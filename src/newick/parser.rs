//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses a single
//! Newick string into a [PhyloTree].

use crate::model::{BranchLength, PhyloTree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Trees may be multifurcating; children are kept in source order, since the
/// CIGAR tree assembled from the result must keep the same shape.
///
/// # Configuration
/// * [`with_num_leaves(num_leaves)`](Self::with_num_leaves)
///     - Expected number of leaves, used to pre-allocate the tree arena.
///       Otherwise it is learned from the first parsed tree.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse a single tree, leaving anything after `;`
/// * [`parse_single`](Self::parse_single) - Parse a single tree and require
///   only whitespace or comments to follow
///
/// # Example
/// ```
/// use cigartree::newick::NewickParser;
/// use cigartree::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1.0,B:1.0)AB:0.5,C:1.5,D:1.5);");
/// let tree = NewickParser::new().parse_single(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().children().len(), 3);
/// ```
pub struct NewickParser {
    num_leaves: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
        }
    }

    /// Sets the expected number of leaves in the parsed tree.
    ///
    /// This allows pre-allocation of the arena; it is not a constraint.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The byte parser is left directly after the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<PhyloTree, ParsingError> {
        let mut tree = PhyloTree::new(self.num_leaves);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let root_index = self.parse_vertex(parser, &mut tree)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        tree.set_root(root_index);

        // Having parsed a full tree, the number of leaves is now known
        self.num_leaves = tree.num_leaves();

        Ok(tree)
    }

    /// Parses exactly one Newick tree; only whitespace and comments may follow.
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid or more text follows
    pub fn parse_single<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<PhyloTree, ParsingError> {
        let tree = self.parse_str(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Unexpected content after end of tree".to_string(),
            ));
        }

        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a vertex (either internal vertex or leaf) with all its
    /// descendants, adds them to the tree and returns the index of the vertex.
    ///
    /// Nesting is tracked on an explicit stack holding the children read so
    /// far of every open `(`, so deep trees do not overflow the call stack.
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let mut open_groups: Vec<Vec<VertexIndex>> = Vec::new();

        loop {
            // Descend through opening parentheses down to the next leaf
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open_groups.push(Vec::with_capacity(2));
                continue;
            }
            let mut index = self.parse_leaf(parser, tree)?;

            // Close every group that ends after this vertex
            loop {
                let Some(mut children) = open_groups.pop() else {
                    return Ok(index);
                };
                children.push(index);

                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    open_groups.push(children);
                    break;
                }
                if parser.consume_if(b')') {
                    index = self.finish_internal_vertex(parser, tree, children)?;
                    continue;
                }

                if parser.is_eof() {
                    return Err(ParsingError::unexpected_eof(parser));
                }
                let next_char = parser.peek().map(char::from);
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ',' or ')' after child but found {:?}", next_char),
                ));
            }
        }
    }

    /// Parses the rest of an internal vertex after its closing `)`, adds it to
    /// the tree, and returns its index:
    /// - `[label][:branch_length]`
    fn finish_internal_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
        children: Vec<VertexIndex>,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        let label = match parser.peek() {
            None | Some(b':' | b',' | b')' | b';') => None,
            Some(_) => Some(parser.parse_label(NEWICK_LABEL_DELIMITERS)?),
        };

        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_internal(children, label, branch_length))
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///   (caller should skip leading comments/whitespace)
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Empty leaf label".to_string(),
            ));
        }

        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(label, branch_length))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if value is not a number or negative
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        // Parse: Whitespace/Comments : Whitespace/Comments
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        // Find end of branch length substring
        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_newick_string(parser, format!("Invalid branch length: {branch_length_str}"))
        })?;
        let branch_length =
            BranchLength::try_new(value).map_err(|msg| ParsingError::invalid_newick_string(parser, msg))?;

        Ok(Some(branch_length))
    }
}
