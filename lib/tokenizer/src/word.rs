//! Word level segmentation.
//!
//! The rules follow the Penn Treebank conventions most word tokenizers use:
//! punctuation becomes its own token, numbers like `3.14` or `1,000` stay
//! whole, a run of periods is a single ellipsis token, a run of hyphens is a
//! single dash token and double quotes turn into the ``` `` ``` / `''` pair.
//! Contractions (`n't`, `'s`) split off in every built-in language. What
//! varies per language (abbreviations that keep their period, elisions that
//! split off a word) lives in
//! [`WordRules`], which is the resource a [`WordSegmenter`] must provision
//! before its first use.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

use crate::error::{Error, Result};
use crate::text::Text;
use crate::types::TokenSequence;

/// Treebank contractions, split off whatever the language.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'m", "'ll", "'d"];

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "inc.", "ltd.",
    "co.", "no.", "jan.", "feb.", "aug.", "sept.", "oct.", "nov.", "dec.",
];

const SPANISH_ABBREVIATIONS: &[&str] = &[
    "sr.", "sra.", "srta.", "dr.", "dra.", "ud.", "uds.", "etc.", "pág.", "núm.", "av.", "aprox.",
    "lic.", "ing.",
];

const FRENCH_ABBREVIATIONS: &[&str] = &[
    "m.", "mme.", "mlle.", "dr.", "etc.", "cf.", "p.", "av.", "bd.", "env.",
];
const FRENCH_ELISIONS: &[&str] = &["l'", "d'", "j'", "qu'", "n'", "s'", "c'", "m'", "t'"];

/// Language specific word segmentation rules.
///
/// Rules can be taken from the built-in table with [`WordRules::builtin`] or
/// provisioned from a JSON file with [`WordRules::from_path`]:
///
/// ```json
/// { "language": "italian", "abbreviations": ["sig.", "dott."], "elided_prefixes": ["l'", "un'"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRules {
    pub language: String,
    /// Lowercase abbreviations, trailing period included, that keep their period.
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Endings split off as their own token (`n't`, `'s`).
    #[serde(default)]
    pub clitic_suffixes: Vec<String>,
    /// Elided beginnings split off as their own token (`l'`, `qu'`).
    #[serde(default)]
    pub elided_prefixes: Vec<String>,
}

impl WordRules {
    /// Looks up the built-in rules for a language name or ISO 639-1 code.
    pub fn builtin(language: &str) -> Result<Self> {
        let (name, abbreviations, clitics, elisions): (&str, &[&str], &[&str], &[&str]) =
            match language.trim().to_lowercase().as_str() {
                "english" | "en" => ("english", ENGLISH_ABBREVIATIONS, CLITICS, &[]),
                "spanish" | "es" | "español" => ("spanish", SPANISH_ABBREVIATIONS, CLITICS, &[]),
                "french" | "fr" | "français" => {
                    ("french", FRENCH_ABBREVIATIONS, CLITICS, FRENCH_ELISIONS)
                }
                _ => {
                    return Err(Error::segmentation(
                        language,
                        "no built-in rules for this language; provide a rules file",
                    ))
                }
            };

        Ok(Self {
            language: name.to_string(),
            abbreviations: to_owned(abbreviations),
            clitic_suffixes: to_owned(clitics),
            elided_prefixes: to_owned(elisions),
        })
    }

    /// Reads rules from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let language = path.display().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::segmentation(&language, e))?;

        serde_json::from_str(&contents).map_err(|e| Error::segmentation(&language, e))
    }
}

/// Splits text into word level tokens for one language.
#[derive(Debug, Clone)]
pub struct WordSegmenter {
    language: String,
    abbreviations: HashSet<String>,
    initialism: Regex,
    clitic_suffix: Option<Regex>,
    elided_prefix: Option<Regex>,
}

impl WordSegmenter {
    /// Provisions the built-in rules of `language`.
    pub fn for_language(language: &str) -> Result<Self> {
        Self::new(WordRules::builtin(language)?)
    }

    /// Compiles a rule set. Fails with a resource error if a rule cannot be
    /// turned into a pattern.
    pub fn new(rules: WordRules) -> Result<Self> {
        let language = rules.language;
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::segmentation(&language, e))
        };

        let initialism = compile(r"^\p{L}(?:\.\p{L})+$")?;
        let clitic_suffix = match alternation(&rules.clitic_suffixes) {
            Some(alts) => Some(compile(&format!("(?i)^(.+?)({alts})$"))?),
            None => None,
        };
        let elided_prefix = match alternation(&rules.elided_prefixes) {
            Some(alts) => Some(compile(&format!("(?i)^({alts})(.+)$"))?),
            None => None,
        };
        let abbreviations: HashSet<String> = rules
            .abbreviations
            .iter()
            .map(|a| a.to_lowercase())
            .collect();

        log::debug!(
            "word rules provisioned for {}: {} abbreviations, {} clitics, {} elisions",
            language,
            abbreviations.len(),
            rules.clitic_suffixes.len(),
            rules.elided_prefixes.len()
        );

        Ok(Self {
            language,
            abbreviations,
            initialism,
            clitic_suffix,
            elided_prefix,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn segment(&self, text: &Text) -> TokenSequence {
        let chunks: Vec<&str> = text.split_whitespace().collect();
        let mut tokens = Vec::new();

        for (i, chunk) in chunks.iter().enumerate() {
            self.segment_chunk(chunk, i + 1 == chunks.len(), &mut tokens);
        }

        tokens
    }

    fn segment_chunk(&self, chunk: &str, is_last: bool, out: &mut TokenSequence) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut word = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();

            if is_word_char(c) || joins(prev, c, next) {
                word.push(c);
                i += 1;
                continue;
            }

            // A sentence-final period is always its own token.
            let ends_text = is_last && i + 1 == chars.len();
            if c == '.' && next != Some('.') && !ends_text && self.is_abbreviation(&word) {
                word.push(c);
                self.flush(&mut word, out);
                i += 1;
                continue;
            }

            self.flush(&mut word, out);

            let run = chars[i..].iter().take_while(|&&d| d == c).count();
            if (c == '.' && run >= 3) || (c == '-' && run >= 2) {
                out.push(c.to_string().repeat(run));
                i += run;
                continue;
            }

            out.push(punctuation_token(c, prev));
            i += 1;
        }

        self.flush(&mut word, out);
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        !word.is_empty()
            && (self.abbreviations.contains(&format!("{}.", word.to_lowercase()))
                || self.initialism.is_match(word))
    }

    /// Emits a finished word, splitting elided prefixes and clitic suffixes.
    fn flush(&self, word: &mut String, out: &mut TokenSequence) {
        if word.is_empty() {
            return;
        }

        let word = std::mem::take(word);
        let mut rest = word.as_str();

        if let Some(caps) = self.elided_prefix.as_ref().and_then(|re| re.captures(rest)) {
            if let (Some(head), Some(tail)) = (caps.get(1), caps.get(2)) {
                out.push(head.as_str().to_string());
                rest = tail.as_str();
            }
        }

        if let Some(caps) = self.clitic_suffix.as_ref().and_then(|re| re.captures(rest)) {
            if let (Some(head), Some(tail)) = (caps.get(1), caps.get(2)) {
                out.push(head.as_str().to_string());
                out.push(tail.as_str().to_string());
                return;
            }
        }

        out.push(rest.to_string());
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds a regex alternation where a straight apostrophe also matches the
/// typographic one.
fn alternation(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let alts = items
        .iter()
        .map(|item| regex::escape(item).replace('\'', "['’]"))
        .collect::<Vec<_>>()
        .join("|");

    Some(alts)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Whether `c` glues the characters around it into a single word.
fn joins(prev: Option<char>, c: char, next: Option<char>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };

    match c {
        ',' | ':' => prev.is_numeric() && next.is_numeric(),
        '.' | '\'' | '’' | '-' | '/' | '_' => is_word_char(prev) && is_word_char(next),
        _ => false,
    }
}

fn punctuation_token(c: char, prev: Option<char>) -> String {
    match c {
        '"' if matches!(prev, None | Some('(' | '[' | '{' | '<')) => "``".to_string(),
        '"' | '”' => "''".to_string(),
        '“' => "``".to_string(),
        _ => c.to_string(),
    }
}
