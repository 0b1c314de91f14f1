//! The full demonstration run: three segmentations, a vocabulary over the
//! bracketed subword sequence, its ids, and the padded batch.

use std::path::PathBuf;

use serde::Serialize;

use crate::align::{pad_to_max_length, PaddedBatch};
use crate::chars::CharSegmenter;
use crate::error::Result;
use crate::index::SequenceIndexer;
use crate::special::SpecialTokens;
use crate::subword::{SubwordModel, SubwordOutput, SubwordSegmenter};
use crate::text::Text;
use crate::types::{IdSequence, TokenSequence};
use crate::vocab::{Vocabulary, VocabularyBuilder};
use crate::word::{WordRules, WordSegmenter};

pub const DEFAULT_LANGUAGE: &str = "spanish";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Language of the built-in word rules.
    pub language: String,
    /// Rules file used instead of the built-in rules.
    pub word_rules: Option<PathBuf>,
    pub specials: SpecialTokens,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            word_rules: None,
            specials: SpecialTokens::default(),
        }
    }
}

/// Everything a run produces, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub text: Text,
    pub language: String,
    pub model: String,
    pub word: TokenSequence,
    pub chars: TokenSequence,
    pub subword: SubwordOutput,
    pub vocabulary: Vocabulary,
    pub ids: IdSequence,
    pub padded: PaddedBatch,
}

#[derive(Debug)]
pub struct Pipeline {
    word: WordSegmenter,
    chars: CharSegmenter,
    subword: SubwordSegmenter,
    specials: SpecialTokens,
}

impl Pipeline {
    /// Provisions the word rules up front, so a missing resource fails here
    /// and not halfway through a run.
    pub fn new(config: PipelineConfig, model: Box<dyn SubwordModel>) -> Result<Self> {
        config.specials.validate()?;

        let rules = match &config.word_rules {
            Some(path) => WordRules::from_path(path)?,
            None => WordRules::builtin(&config.language)?,
        };

        Ok(Self {
            word: WordSegmenter::new(rules)?,
            chars: CharSegmenter::new(),
            subword: SubwordSegmenter::new(model, &config.specials),
            specials: config.specials,
        })
    }

    pub fn specials(&self) -> &SpecialTokens {
        &self.specials
    }

    pub fn run(&self, raw: &str) -> Result<Report> {
        let text = Text::new(raw)?;
        log::info!("running pipeline on {} characters", text.chars().count());

        let word = self.word.segment(&text);
        let chars = self.chars.segment(&text);
        let subword = self.subword.segment(&text);
        log::debug!(
            "segmented into {} words, {} chars, {} subword pieces",
            word.len(),
            chars.len(),
            subword.pieces.len()
        );

        let vocabulary = VocabularyBuilder::new(self.specials.unknown.as_str())
            .specials(self.specials.ordered())
            .build([&subword.bracketed]);
        let ids = SequenceIndexer::new(&vocabulary).index(&subword.bracketed);

        let padded = pad_to_max_length(
            &[word.as_slice(), chars.as_slice(), subword.pieces.as_slice()],
            &self.specials.pad,
        )?;

        Ok(Report {
            text,
            language: self.word.language().to_string(),
            model: self.subword.model_name().to_string(),
            word,
            chars,
            subword,
            vocabulary,
            ids,
            padded,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::subword::WordPieceModel;

    /// Records how often it was asked to segment.
    struct Counting(Arc<AtomicUsize>);

    impl SubwordModel for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn segment(&self, text: &str) -> TokenSequence {
            self.0.fetch_add(1, Ordering::SeqCst);
            text.split_whitespace().map(String::from).collect()
        }
    }

    fn pipeline() -> Pipeline {
        let model = WordPieceModel::embedded().expect("embedded vocabulary");
        Pipeline::new(PipelineConfig::default(), Box::new(model)).expect("spanish rules")
    }

    #[test]
    fn runs_every_stage() {
        let report = pipeline().run("  cats run fast. ").expect("text is not empty");

        assert_eq!(report.text.as_str(), "cats run fast.");
        assert_eq!(report.word, vec!["cats", "run", "fast", "."]);
        assert_eq!(report.chars.len(), 14);
        assert_eq!(report.subword.pieces, vec!["cat", "##s", "run", "fast", "."]);
        assert_eq!(
            report.subword.bracketed,
            vec!["<bos>", "cat", "##s", "run", "fast", ".", "<eos>"]
        );
        assert_eq!(
            report.vocabulary.itos(),
            vec!["<unk>", "<pad>", "<bos>", "<eos>", "cat", "##s", "run", "fast", "."]
        );
        assert_eq!(report.ids, vec![2, 4, 5, 6, 7, 8, 3]);
        assert_eq!(report.padded.target_length, 14);
        assert_eq!(report.padded.lengths, vec![4, 14, 5]);
        assert_eq!(report.padded.sequences[0][4..], vec!["<pad>"; 10][..]);
    }

    #[test]
    fn empty_input_stops_before_segmentation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new(
            PipelineConfig::default(),
            Box::new(Counting(Arc::clone(&calls))),
        )
        .expect("spanish rules");

        let err = pipeline.run("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        pipeline.run("hola").expect("text is not empty");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_language_fails_at_construction() {
        let config = PipelineConfig {
            language: "klingon".into(),
            ..PipelineConfig::default()
        };
        let model = WordPieceModel::embedded().expect("embedded vocabulary");

        let err = Pipeline::new(config, Box::new(model)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }

    #[test]
    fn default_pipeline_splits_contractions() {
        let report = pipeline().run("don't it's").expect("text is not empty");

        assert_eq!(report.language, "spanish");
        assert_eq!(report.word, vec!["do", "n't", "it", "'s"]);
    }

    #[test]
    fn shared_special_surface_forms_fail_at_construction() {
        let config = PipelineConfig {
            specials: SpecialTokens {
                pad: "<unk>".into(),
                ..SpecialTokens::default()
            },
            ..PipelineConfig::default()
        };
        let model = WordPieceModel::embedded().expect("embedded vocabulary");

        let err = Pipeline::new(config, Box::new(model)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn runs_own_their_vocabulary() {
        let pipeline = pipeline();
        let first = pipeline.run("el gato").expect("text is not empty");
        let second = pipeline.run("el perro").expect("text is not empty");

        assert_eq!(first.vocabulary.get("gato"), Some(5));
        assert_eq!(second.vocabulary.get("gato"), None);
        assert_eq!(second.vocabulary.get("perro"), Some(5));
    }

    #[test]
    fn custom_specials_flow_through_every_stage() {
        let config = PipelineConfig {
            specials: SpecialTokens {
                unknown: "[UNK]".into(),
                pad: "[PAD]".into(),
                bos: "[CLS]".into(),
                eos: "[SEP]".into(),
            },
            ..PipelineConfig::default()
        };
        let model = WordPieceModel::embedded().expect("embedded vocabulary");
        let report = Pipeline::new(config, Box::new(model))
            .expect("spanish rules")
            .run("hola mundo")
            .expect("text is not empty");

        assert_eq!(report.subword.bracketed.first().map(String::as_str), Some("[CLS]"));
        assert_eq!(report.vocabulary.get("[SEP]"), Some(3));
        assert!(report.padded.sequences[0].contains(&"[PAD]".to_string()));
    }

    #[test]
    fn report_serializes_for_the_presenter() {
        let report = pipeline().run("hola").expect("text is not empty");
        let json = serde_json::to_value(&report).expect("serializes");

        assert_eq!(json["text"], "hola");
        assert_eq!(json["subword"]["bracketed"][0], "<bos>");
        assert_eq!(json["vocabulary"][4]["token"], "hola");
        assert_eq!(json["padded"]["target_length"], 4);
    }
}
