//! Numbered context block built from retrieved passages.

use super::passage::RetrievedPassage;
use super::response::Citation;

/// Context lines plus the citation slot for each retrieval rank.
///
/// Rank `i` (1-based) refers to the i-th retrieved passage. Blank passages
/// produce no line and leave their slot empty, so later passages keep
/// their original rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberedContext {
    block: String,
    slots: Vec<Option<Citation>>,
}

impl NumberedContext {
    pub fn build(passages: &[RetrievedPassage]) -> Self {
        let mut block = String::new();
        let mut slots = Vec::with_capacity(passages.len());

        for (i, passage) in passages.iter().enumerate() {
            if passage.is_blank() {
                slots.push(None);
                continue;
            }
            block.push_str(&format!("[{}] {}\n", i + 1, passage.text.trim()));
            slots.push(Some(Citation::new(passage.source.clone(), passage.page)));
        }

        Self { block, slots }
    }

    /// The `[i] text` lines, one per usable passage.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// True when no passage contributed text.
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Citation for a 1-based rank, if that rank holds a usable passage.
    pub fn citation_for(&self, rank: usize) -> Option<&Citation> {
        rank.checked_sub(1)
            .and_then(|idx| self.slots.get(idx))
            .and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_numbered_by_rank_and_trimmed() {
        let ctx = NumberedContext::build(&[
            RetrievedPassage::new("  first  ", "a.pdf", 1),
            RetrievedPassage::new("second\n", "b.pdf", 2),
        ]);
        assert_eq!(ctx.block(), "[1] first\n[2] second\n");
        assert_eq!(ctx.citation_for(2), Some(&Citation::new("b.pdf", 2)));
    }

    #[test]
    fn blank_passage_keeps_later_ranks() {
        let ctx = NumberedContext::build(&[
            RetrievedPassage::new("   ", "a.pdf", 1),
            RetrievedPassage::new("kept", "b.pdf", 5),
        ]);
        assert_eq!(ctx.block(), "[2] kept\n");
        assert_eq!(ctx.citation_for(1), None);
        assert_eq!(ctx.citation_for(2), Some(&Citation::new("b.pdf", 5)));
    }

    #[test]
    fn all_blank_passages_give_empty_context() {
        let ctx = NumberedContext::build(&[
            RetrievedPassage::new("", "a.pdf", 1),
            RetrievedPassage::new(" \t", "b.pdf", 1),
        ]);
        assert!(ctx.is_empty());
    }

    #[test]
    fn out_of_range_ranks_have_no_citation() {
        let ctx = NumberedContext::build(&[RetrievedPassage::new("x", "a.pdf", 1)]);
        assert_eq!(ctx.citation_for(0), None);
        assert_eq!(ctx.citation_for(99), None);
    }
}
