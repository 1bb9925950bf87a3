//! Byte source over a fully loaded tree or alignment file.

use crate::parser::byte_source::ByteSource;
use std::path::Path;

/// UTF-8 byte order mark, as written by some editors at the start of text files
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// Byte source owning the complete input.
///
/// A leading UTF-8 byte order mark is skipped, so that a `>` or `# STOCKHOLM`
/// header saved by such an editor is still found at the start. Positions
/// count from the start of the data including the mark.
pub struct InMemoryByteSource {
    data: Vec<u8>,
    cursor: usize,
}

impl InMemoryByteSource {
    /// Takes ownership of `bytes` and positions after a byte order mark, if any.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let cursor = if bytes.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };
        Self { data: bytes, cursor }
    }

    /// Loads the file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        std::fs::read(path).map(Self::from_vec)
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor)
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.cursor).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let rest = self.data.get(self.cursor..).unwrap_or_default();
        &rest[..k.min(rest.len())]
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor
    }

    fn is_eof(&self) -> bool {
        self.remaining() == 0
    }
}
