//! Subword segmentation through a pretrained model.
//!
//! The model is an opaque capability: given text it returns pieces drawn from
//! its own fixed vocabulary. [`SubwordSegmenter`] only consumes that output and
//! wraps it with the begin and end of sequence markers.

use serde::Serialize;

use crate::special::SpecialTokens;
use crate::text::Text;
use crate::types::{Token, TokenSequence};

pub mod wordpiece;

pub use wordpiece::WordPieceModel;

/// A pretrained, deterministic text to subword pieces mapping.
pub trait SubwordModel: Send + Sync {
    /// Human readable name of the loaded model, used in logs and reports.
    fn name(&self) -> &str;

    fn segment(&self, text: &str) -> TokenSequence;
}

/// Raw model pieces and the bracketed sequence fed to the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubwordOutput {
    pub pieces: TokenSequence,
    pub bracketed: TokenSequence,
}

pub struct SubwordSegmenter {
    model: Box<dyn SubwordModel>,
    bos: Token,
    eos: Token,
}

impl SubwordSegmenter {
    pub fn new(model: Box<dyn SubwordModel>, specials: &SpecialTokens) -> Self {
        Self {
            model,
            bos: specials.bos.clone(),
            eos: specials.eos.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn segment(&self, text: &Text) -> SubwordOutput {
        let pieces = self.model.segment(text);

        let mut bracketed = Vec::with_capacity(pieces.len() + 2);
        bracketed.push(self.bos.clone());
        bracketed.extend(pieces.iter().cloned());
        bracketed.push(self.eos.clone());

        SubwordOutput { pieces, bracketed }
    }
}

impl std::fmt::Debug for SubwordSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubwordSegmenter")
            .field("model", &self.model.name())
            .field("bos", &self.bos)
            .field("eos", &self.eos)
            .finish()
    }
}
