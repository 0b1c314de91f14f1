//! Uncased WordPiece segmentation, the scheme used by BERT.
//!
//! A model is a `vocab.txt` file with one piece per line. Text is cleaned,
//! lowercased and stripped of accents, split on whitespace and punctuation,
//! and every word is then cut greedily into the longest pieces the
//! vocabulary knows, continuation pieces carrying the `##` prefix.

use std::collections::HashMap;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::subword::SubwordModel;
use crate::types::{Id, TokenSequence};

/// A small English and Spanish vocabulary compiled into the crate, enough to
/// segment any lowercase ASCII text without a pretrained download.
pub const EMBEDDED_VOCAB: &str = include_str!("vocab.txt");

const CONTINUATION_PREFIX: &str = "##";
const UNKNOWN_PIECE: &str = "[UNK]";
const MAX_INPUT_CHARS_PER_WORD: usize = 100;

#[derive(Debug, Clone)]
pub struct WordPieceModel {
    name: String,
    vocab: HashMap<String, Id>,
    unknown: String,
    max_input_chars_per_word: usize,
}

impl WordPieceModel {
    pub fn embedded() -> Result<Self> {
        Self::from_vocab_text("embedded", EMBEDDED_VOCAB)
    }

    /// Loads a BERT style `vocab.txt`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::model(&name, e))?;

        Self::from_vocab_text(&name, &contents)
    }

    pub fn from_vocab_text(name: &str, contents: &str) -> Result<Self> {
        let mut vocab = HashMap::new();
        for line in contents.lines() {
            let piece = line.trim_end_matches('\r');
            if piece.is_empty() || vocab.contains_key(piece) {
                continue;
            }
            let id = Id::try_from(vocab.len()).map_err(|e| Error::model(name, e))?;
            vocab.insert(piece.to_string(), id);
        }

        if vocab.is_empty() {
            return Err(Error::model(name, "the vocabulary has no pieces"));
        }

        log::info!("wordpiece model {} loaded with {} pieces", name, vocab.len());

        Ok(Self {
            name: name.to_string(),
            vocab,
            unknown: UNKNOWN_PIECE.to_string(),
            max_input_chars_per_word: MAX_INPUT_CHARS_PER_WORD,
        })
    }

    /// Piece emitted for words the vocabulary cannot cover.
    pub fn with_unknown(mut self, unknown: &str) -> Self {
        self.unknown = unknown.to_string();
        self
    }

    pub fn with_max_input_chars_per_word(mut self, max: usize) -> Self {
        self.max_input_chars_per_word = max;
        self
    }

    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// The model's own id for a piece, as listed in its vocabulary file.
    pub fn piece_id(&self, piece: &str) -> Option<Id> {
        self.vocab.get(piece).copied()
    }

    /// Cleans, normalizes and splits text into words on whitespace and
    /// punctuation. CJK ideographs become one word each.
    fn basic_split(&self, text: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();

        let normalized = text.to_lowercase().nfd().collect::<String>();
        for c in normalized.chars() {
            if c == '\0' || c == '\u{fffd}' || is_combining_mark(c) {
                continue;
            }
            if c.is_whitespace() {
                flush(&mut current, &mut words);
            } else if c.is_control() {
                continue;
            } else if is_punctuation(c) || is_cjk(c) {
                flush(&mut current, &mut words);
                words.push(c.to_string());
            } else {
                current.push(c);
            }
        }
        flush(&mut current, &mut words);

        words
    }

    /// Greedy longest-match-first split of a single word.
    fn split_word(&self, word: &str, out: &mut TokenSequence) {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > self.max_input_chars_per_word {
            out.push(self.unknown.clone());
            return;
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let mut end = chars.len();
            let mut found = None;

            while start < end {
                let mut candidate: String = chars[start..end].iter().collect();
                if start > 0 {
                    candidate.insert_str(0, CONTINUATION_PREFIX);
                }
                if self.vocab.contains_key(&candidate) {
                    found = Some(candidate);
                    break;
                }
                end -= 1;
            }

            match found {
                Some(piece) => {
                    pieces.push(piece);
                    start = end;
                }
                None => {
                    // One unmatchable remainder makes the whole word unknown.
                    out.push(self.unknown.clone());
                    return;
                }
            }
        }

        out.extend(pieces);
    }
}

impl SubwordModel for WordPieceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn segment(&self, text: &str) -> TokenSequence {
        let mut pieces = Vec::new();
        for word in self.basic_split(text) {
            self.split_word(&word, &mut pieces);
        }
        pieces
    }
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    !c.is_alphanumeric() && !c.is_whitespace()
}

fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}
