//! Type aliases shared by the segmenters, the vocabulary and the aligner.

/// A string fragment produced by a segmenter or injected as a special token.
pub type Token = String;

/// Ordered tokens; the order is the order of the original text.
pub type TokenSequence = Vec<Token>;

/// Position of a token in a [`crate::Vocabulary`].
///
/// Ids are dense and start at 0 with the first special token.
pub type Id = u32;

/// One id per token of a [`TokenSequence`].
pub type IdSequence = Vec<Id>;
