//! Token <-> id mapping seeded with reserved special tokens.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};

use crate::types::{Id, Token};

/// One row of the vocabulary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabEntry {
    pub id: Id,
    pub token: Token,
}

/// A dense, immutable token <-> id mapping.
///
/// Ids start at 0 and have no gaps. Special tokens hold the lowest ids, in the
/// order they were supplied to the [`VocabularyBuilder`]. The unknown token is
/// always present, so every lookup resolves to an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    itos: Vec<Token>,
    stoi: HashMap<Token, Id>,
    default_index: Id,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Exact id of `token`, without the default fallback.
    pub fn get(&self, token: &str) -> Option<Id> {
        self.stoi.get(token).copied()
    }

    /// Id of `token`, or the unknown id when it is absent.
    pub fn lookup(&self, token: &str) -> Id {
        self.get(token).unwrap_or(self.default_index)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.stoi.contains_key(token)
    }

    pub fn token(&self, id: Id) -> Option<&str> {
        self.itos.get(id as usize).map(String::as_str)
    }

    /// The id returned for tokens that are not in the vocabulary.
    pub fn default_index(&self) -> Id {
        self.default_index
    }

    /// Tokens indexed by id.
    pub fn itos(&self) -> &[Token] {
        &self.itos
    }

    /// `(id, token)` rows sorted by id.
    pub fn entries(&self) -> impl Iterator<Item = VocabEntry> + '_ {
        self.itos.iter().enumerate().map(|(i, token)| VocabEntry {
            id: i as Id,
            token: token.clone(),
        })
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

/// Order in which text-derived tokens receive their ids.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenOrder {
    /// First occurrence across the input sequences.
    #[default]
    FirstOccurrence,
    /// Most frequent first, ties broken alphabetically.
    Frequency,
}

#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    unknown: Token,
    specials: Vec<Token>,
    min_freq: usize,
    order: TokenOrder,
}

impl VocabularyBuilder {
    /// `unknown` is the token whose id is returned for absent tokens. It is
    /// reserved ahead of the other specials unless they already list it.
    pub fn new(unknown: impl Into<Token>) -> Self {
        Self {
            unknown: unknown.into(),
            specials: Vec::new(),
            min_freq: 1,
            order: TokenOrder::default(),
        }
    }

    /// Reserved tokens, assigned ids `0..k` in this order.
    pub fn specials<I, S>(mut self, specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Token>,
    {
        self.specials = specials.into_iter().map(Into::into).collect();
        self
    }

    /// Drops text-derived tokens seen fewer than `min_freq` times. Specials are
    /// always kept.
    pub fn min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = min_freq.max(1);
        self
    }

    pub fn order(mut self, order: TokenOrder) -> Self {
        self.order = order;
        self
    }

    pub fn build<I, S>(&self, sequences: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[Token]>,
    {
        let mut itos: Vec<Token> = Vec::new();
        let mut stoi: HashMap<Token, Id> = HashMap::new();

        let mut reserved: Vec<&Token> = Vec::with_capacity(self.specials.len() + 1);
        if !self.specials.contains(&self.unknown) {
            reserved.push(&self.unknown);
        }
        reserved.extend(&self.specials);

        for special in &reserved {
            if !stoi.contains_key(*special) {
                stoi.insert((*special).clone(), itos.len() as Id);
                itos.push((*special).clone());
            }
        }
        let default_index = stoi[&self.unknown];

        // Specials win over text-derived tokens with the same surface form.
        let reserved: HashSet<&str> = reserved.iter().map(|s| s.as_str()).collect();
        let mut seen: Vec<Token> = Vec::new();
        let mut counts: HashMap<Token, usize> = HashMap::new();

        for sequence in sequences {
            for token in sequence.as_ref() {
                if reserved.contains(token.as_str()) {
                    continue;
                }
                let count = counts.entry(token.clone()).or_insert(0);
                if *count == 0 {
                    seen.push(token.clone());
                }
                *count += 1;
            }
        }

        if self.order == TokenOrder::Frequency {
            seen.sort_by(|a, b| counts[b].cmp(&counts[a]).then_with(|| a.cmp(b)));
        }

        for token in seen {
            if counts[&token] < self.min_freq {
                continue;
            }
            stoi.insert(token.clone(), itos.len() as Id);
            itos.push(token);
        }

        log::debug!(
            "vocabulary built with {} tokens ({} specials, default index {})",
            itos.len(),
            reserved.len(),
            default_index
        );

        Vocabulary {
            itos,
            stoi,
            default_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SPECIALS: [&str; 4] = ["<unk>", "<pad>", "<bos>", "<eos>"];

    fn tokens(items: &[&str]) -> Vec<Token> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new("<unk>").specials(SPECIALS)
    }

    #[test]
    fn specials_first_then_first_occurrence() {
        let sequence = tokens(&["<bos>", "ca", "##ts", "run", "fast", "<eos>"]);
        let vocab = builder().build([&sequence]);

        assert_eq!(vocab.get("<unk>"), Some(0));
        assert_eq!(vocab.get("<pad>"), Some(1));
        assert_eq!(vocab.get("<bos>"), Some(2));
        assert_eq!(vocab.get("<eos>"), Some(3));
        assert_eq!(vocab.get("ca"), Some(4));
        assert_eq!(vocab.get("##ts"), Some(5));
        assert_eq!(vocab.get("run"), Some(6));
        assert_eq!(vocab.get("fast"), Some(7));
        assert_eq!(vocab.len(), 8);
        assert_eq!(vocab.default_index(), 0);
    }

    #[test]
    fn special_lookalikes_are_not_reassigned() {
        let sequence = tokens(&["<pad>", "a", "<unk>", "a", "<eos>"]);
        let vocab = builder().build([&sequence]);

        assert_eq!(vocab.itos(), tokens(&["<unk>", "<pad>", "<bos>", "<eos>", "a"]));
    }

    #[test]
    fn degenerate_inputs_are_legal() {
        let empty: Vec<Token> = Vec::new();

        let vocab = VocabularyBuilder::new("<unk>").build([&empty]);
        assert_eq!(vocab.itos(), tokens(&["<unk>"]));
        assert_eq!(vocab.default_index(), 0);

        let vocab = builder().build([&empty]);
        assert_eq!(vocab.itos(), tokens(&SPECIALS));

        let vocab = VocabularyBuilder::new("<unk>").build([tokens(&["x", "y", "x"])]);
        assert_eq!(vocab.itos(), tokens(&["<unk>", "x", "y"]));
    }

    #[test]
    fn unknown_token_is_reserved_when_specials_omit_it() {
        let vocab = VocabularyBuilder::new("<unk>")
            .specials(["<pad>", "<bos>"])
            .build([tokens(&["a"])]);

        assert_eq!(vocab.itos(), tokens(&["<unk>", "<pad>", "<bos>", "a"]));
        assert_eq!(vocab.lookup("zzz"), 0);
    }

    #[test]
    fn unknown_token_keeps_its_place_among_specials() {
        let vocab = VocabularyBuilder::new("<unk>")
            .specials(["<pad>", "<unk>"])
            .build([tokens(&["a"])]);

        assert_eq!(vocab.itos(), tokens(&["<pad>", "<unk>", "a"]));
        assert_eq!(vocab.default_index(), 1);
        assert_eq!(vocab.lookup("zzz"), 1);
    }

    #[test]
    fn lookup_falls_back_to_default() {
        let vocab = builder().build([tokens(&["hola"])]);

        assert_eq!(vocab.lookup("hola"), 4);
        assert_eq!(vocab.lookup("adiós"), 0);
        assert_eq!(vocab.get("adiós"), None);
        assert_eq!(vocab.token(4), Some("hola"));
        assert_eq!(vocab.token(5), None);
    }

    #[test]
    fn min_freq_filters_rare_tokens_only() {
        let vocab = builder()
            .min_freq(2)
            .build([tokens(&["a", "b", "a"]), tokens(&["c", "b", "<bos>"])]);

        assert_eq!(vocab.itos(), tokens(&["<unk>", "<pad>", "<bos>", "<eos>", "a", "b"]));
    }

    #[test]
    fn frequency_order_breaks_ties_alphabetically() {
        let vocab = builder()
            .order(TokenOrder::Frequency)
            .build([tokens(&["b", "c", "a", "c", "b", "c"])]);

        assert_eq!(&vocab.itos()[4..], tokens(&["c", "b", "a"]).as_slice());
    }

    #[test]
    fn entries_are_sorted_by_id() {
        let vocab = builder().build([tokens(&["x"])]);
        let ids: Vec<Id> = vocab.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        let json = serde_json::to_string(&vocab).expect("serializes");
        assert!(json.starts_with(r#"[{"id":0,"token":"<unk>"}"#));
    }

    proptest! {
        #[test]
        fn ids_are_dense_and_text_tokens_follow_specials(
            sequence in prop::collection::vec("<unk>|<bos>|[a-e]{1,2}", 0..40)
        ) {
            let vocab = builder().build([&sequence]);

            for (i, token) in vocab.itos().iter().enumerate() {
                prop_assert_eq!(vocab.get(token), Some(i as Id));
            }
            for token in &sequence {
                let id = vocab.get(token).expect("every input token is indexed");
                if !SPECIALS.contains(&token.as_str()) {
                    prop_assert!(id as usize >= SPECIALS.len());
                }
            }
        }

        #[test]
        fn rebuilding_is_idempotent(sequence in prop::collection::vec("[a-z]{1,3}", 0..30)) {
            prop_assert_eq!(builder().build([&sequence]), builder().build([&sequence]));
        }
    }
}
