//! Three ways of turning text into tokens, side by side.
//!
//! - [`WordSegmenter`]: Treebank style words with per-language rules.
//! - [`CharSegmenter`]: one token per character.
//! - [`SubwordSegmenter`]: pieces from a pretrained [`SubwordModel`] such as
//!   the bundled [`WordPieceModel`], wrapped with begin and end markers.
//!
//! The bracketed subword sequence feeds a [`Vocabulary`] seeded with the
//! special tokens, a [`SequenceIndexer`] turns it into ids, and
//! [`pad_to_max_length`] aligns the three raw sequences. [`Pipeline`] chains
//! all of it:
//!
//! ```
//! use tokenizer::{Pipeline, PipelineConfig, WordPieceModel};
//!
//! let model = WordPieceModel::embedded()?;
//! let pipeline = Pipeline::new(PipelineConfig::default(), Box::new(model))?;
//! let report = pipeline.run("cats run fast.")?;
//!
//! assert_eq!(report.word, vec!["cats", "run", "fast", "."]);
//! assert_eq!(report.ids.first(), Some(&2));
//! # Ok::<(), tokenizer::Error>(())
//! ```

pub mod align;
pub mod chars;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod special;
pub mod subword;
pub mod text;
pub mod types;
pub mod vocab;
pub mod word;

pub use align::{pad_to_max_length, PaddedBatch};
pub use chars::CharSegmenter;
pub use error::{Error, ErrorKind, Result};
pub use index::SequenceIndexer;
pub use pipeline::{Pipeline, PipelineConfig, Report, DEFAULT_LANGUAGE};
pub use special::{SpecialToken, SpecialTokens};
pub use subword::{SubwordModel, SubwordOutput, SubwordSegmenter, WordPieceModel};
pub use text::Text;
pub use types::{Id, IdSequence, Token, TokenSequence};
pub use vocab::{TokenOrder, VocabEntry, Vocabulary, VocabularyBuilder};
pub use word::{WordRules, WordSegmenter};
