//! Sliding-window text splitter used when ingesting pages.

use crate::domain::foundation::ValidationError;

/// Default cap on chunks produced from a single text.
pub const DEFAULT_MAX_CHUNKS: usize = 10_000;

/// Splits text into fixed-size, overlapping character windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    max_chunks: usize,
}

impl TextSplitter {
    /// Creates a splitter, requiring `0 <= chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ValidationError> {
        if chunk_size == 0 {
            return Err(ValidationError::out_of_range("chunk_size", 1, i64::MAX, 0));
        }
        if chunk_overlap >= chunk_size {
            return Err(ValidationError::out_of_range(
                "chunk_overlap",
                0,
                chunk_size as i64 - 1,
                chunk_overlap as i64,
            ));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            max_chunks: DEFAULT_MAX_CHUNKS,
        })
    }

    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Splits `text` into windows of at most `chunk_size` characters.
    ///
    /// Consecutive windows share `chunk_overlap` characters. The window
    /// always advances, and at most `max_chunks` windows are returned.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len && chunks.len() < self.max_chunks {
            let end = (start + self.chunk_size).min(len);
            chunks.push(chars[start..end].iter().collect());
            if end == len {
                break;
            }
            let next = end - self.chunk_overlap;
            start = if next <= start { end } else { next };
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(TextSplitter::new(0, 0).is_err());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        match TextSplitter::new(10, 10) {
            Err(ValidationError::OutOfRange { field, .. }) => assert_eq!(field, "chunk_overlap"),
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_gives_no_chunks() {
        assert!(TextSplitter::new(5, 1).unwrap().split("").is_empty());
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        let chunks = TextSplitter::new(4, 1).unwrap().split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(TextSplitter::new(100, 10).unwrap().split("short"), vec!["short"]);
    }

    #[test]
    fn splits_on_characters_not_bytes() {
        let chunks = TextSplitter::new(2, 0).unwrap().split("年假天数");
        assert_eq!(chunks, vec!["年假", "天数"]);
    }

    #[test]
    fn max_chunks_caps_output() {
        let chunks = TextSplitter::new(1, 0)
            .unwrap()
            .with_max_chunks(3)
            .split("abcdef");
        assert_eq!(chunks.len(), 3);
    }
}
