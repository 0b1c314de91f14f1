use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Token;

/// Reserved vocabulary roles. They are injected by the pipeline and never
/// produced by a segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialToken {
    Unknown,
    Pad,
    BeginOfSequence,
    EndOfSequence,
}

impl SpecialToken {
    /// Every role, in the order the vocabulary seeds them.
    pub const ALL: [SpecialToken; 4] = [
        Self::Unknown,
        Self::Pad,
        Self::BeginOfSequence,
        Self::EndOfSequence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "<unk>",
            Self::Pad => "<pad>",
            Self::BeginOfSequence => "<bos>",
            Self::EndOfSequence => "<eos>",
        }
    }
}

/// Surface forms for the four special token roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    pub unknown: Token,
    pub pad: Token,
    pub bos: Token,
    pub eos: Token,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            unknown: SpecialToken::Unknown.as_str().to_string(),
            pad: SpecialToken::Pad.as_str().to_string(),
            bos: SpecialToken::BeginOfSequence.as_str().to_string(),
            eos: SpecialToken::EndOfSequence.as_str().to_string(),
        }
    }
}

impl SpecialTokens {
    pub fn get(&self, role: SpecialToken) -> &str {
        match role {
            SpecialToken::Unknown => &self.unknown,
            SpecialToken::Pad => &self.pad,
            SpecialToken::BeginOfSequence => &self.bos,
            SpecialToken::EndOfSequence => &self.eos,
        }
    }

    /// Surface forms ordered unknown, pad, bos, eos.
    pub fn ordered(&self) -> Vec<Token> {
        SpecialToken::ALL
            .iter()
            .map(|role| self.get(*role).to_string())
            .collect()
    }

    /// Rejects surface forms shared by two roles, which would leave the
    /// vocabulary with fewer reserved ids than roles.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for token in SpecialToken::ALL.iter().map(|role| self.get(*role)) {
            if !seen.insert(token) {
                return Err(Error::DuplicateSpecial(token.to_string()));
            }
        }
        Ok(())
    }
}
