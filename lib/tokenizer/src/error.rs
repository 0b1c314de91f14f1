use thiserror::Error;

/// The stage family an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input text or the special tokens were rejected before segmentation.
    Input,
    /// A segmentation resource or the subword model could not be obtained.
    ResourceUnavailable,
    /// A batch could not be aligned.
    Alignment,
}

/// Error type returned from this library's functions
#[derive(Debug, Error)]
pub enum Error {
    /// The text was empty or whitespace only.
    #[error("no input: the text is empty after trimming")]
    EmptyInput,
    /// The word segmentation rules for a language could not be provisioned.
    #[error("segmentation resource unavailable for {language:?}: {reason}")]
    SegmentationResource { language: String, reason: String },
    /// The pretrained subword model could not be loaded.
    #[error("model unavailable ({model}): {reason}")]
    ModelUnavailable { model: String, reason: String },
    /// Two special token roles share one surface form.
    #[error("special token {0:?} is assigned to more than one role")]
    DuplicateSpecial(String),
    /// Attempted to pad a batch without sequences.
    #[error("cannot align an empty batch of sequences")]
    EmptyBatch,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput | Self::DuplicateSpecial(_) => ErrorKind::Input,
            Self::SegmentationResource { .. } | Self::ModelUnavailable { .. } => {
                ErrorKind::ResourceUnavailable
            }
            Self::EmptyBatch => ErrorKind::Alignment,
        }
    }

    pub(crate) fn segmentation(language: &str, reason: impl ToString) -> Self {
        Self::SegmentationResource {
            language: language.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn model(model: impl ToString, reason: impl ToString) -> Self {
        Self::ModelUnavailable {
            model: model.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
