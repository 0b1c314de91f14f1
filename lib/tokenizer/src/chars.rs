use crate::text::Text;
use crate::types::TokenSequence;

/// Splits text into one token per character, whitespace and punctuation
/// included verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl CharSegmenter {
    pub fn new() -> Self {
        Self
    }

    pub fn segment(&self, text: &Text) -> TokenSequence {
        text.chars().map(String::from).collect()
    }
}
