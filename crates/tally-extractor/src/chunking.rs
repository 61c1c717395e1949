//! Overlapping fixed-size windows over statement text
//!
//! Offsets and lengths are counted in characters, so a window never splits a
//! multi-byte character.

use crate::error::ExtractorError;

/// A contiguous slice of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// Position of this window in the sequence
    pub index: usize,
    /// Character offset of the first character
    pub start: usize,
    /// Number of characters in `text`
    pub len: usize,
    /// The window text, borrowed from the source
    pub text: &'a str,
    /// Configured window size
    pub size: usize,
    /// Configured overlap
    pub overlap: usize,
}

impl Window<'_> {
    /// Character offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Splits text into overlapping windows
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// Fails with `InvalidChunkParameters` unless `0 <= overlap < size`;
    /// otherwise the window start would never advance.
    pub fn new(size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if size == 0 || overlap >= size {
            return Err(ExtractorError::InvalidChunkParameters { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// Chunk the given text
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<Window<'a>> {
        // Byte offset of every character, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = boundaries.len() - 1;

        let mut windows = Vec::new();
        let mut start = 0;

        while start < total {
            let end = (start + self.size).min(total);
            windows.push(Window {
                index: windows.len(),
                start,
                len: end - start,
                text: &text[boundaries[start]..boundaries[end]],
                size: self.size,
                overlap: self.overlap,
            });

            if end == total {
                break;
            }
            start = end - self.overlap;
        }

        windows
    }
}

/// Split `text` into windows of `size` characters sharing `overlap` characters
///
/// # Examples
///
/// ```
/// use tally_extractor::chunk;
///
/// let windows = chunk("abcdefghij", 4, 1).unwrap();
/// let texts: Vec<_> = windows.iter().map(|w| w.text).collect();
/// assert_eq!(texts, vec!["abcd", "defg", "ghij"]);
///
/// assert!(chunk("abc", 4, 4).is_err());
/// ```
pub fn chunk(text: &str, size: usize, overlap: usize) -> Result<Vec<Window<'_>>, ExtractorError> {
    Ok(TextChunker::new(size, overlap)?.chunk(text))
}
