use crate::types::{Id, IdSequence, TokenSequence};
use crate::vocab::Vocabulary;

/// Maps token sequences to id sequences through a [`Vocabulary`].
#[derive(Debug, Clone, Copy)]
pub struct SequenceIndexer<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> SequenceIndexer<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// One id per token, absent tokens resolving to the unknown id.
    pub fn index<S: AsRef<str>>(&self, tokens: &[S]) -> IdSequence {
        tokens
            .iter()
            .map(|token| self.vocab.lookup(token.as_ref()))
            .collect()
    }

    /// The inverse mapping, ids back to tokens. `None` if any id is out of
    /// range.
    pub fn lookup_tokens(&self, ids: &[Id]) -> Option<TokenSequence> {
        ids.iter()
            .map(|&id| self.vocab.token(id).map(str::to_string))
            .collect()
    }
}
