use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::TokenSequence;

/// Sequences right padded to a shared length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaddedBatch {
    pub sequences: Vec<TokenSequence>,
    pub target_length: usize,
    /// Length of every input sequence before padding.
    pub lengths: Vec<usize>,
}

/// Pads every sequence with copies of `pad` up to the longest length in the
/// batch. Inputs are copied, never modified.
pub fn pad_to_max_length<S: AsRef<[String]>>(sequences: &[S], pad: &str) -> Result<PaddedBatch> {
    let target_length = sequences
        .iter()
        .map(|s| s.as_ref().len())
        .max()
        .ok_or(Error::EmptyBatch)?;

    let lengths: Vec<usize> = sequences.iter().map(|s| s.as_ref().len()).collect();
    let sequences = sequences
        .iter()
        .map(|s| {
            let mut padded = s.as_ref().to_vec();
            padded.resize(target_length, pad.to_string());
            padded
        })
        .collect();

    log::debug!("aligned {} sequences to length {}", lengths.len(), target_length);

    Ok(PaddedBatch {
        sequences,
        target_length,
        lengths,
    })
}
