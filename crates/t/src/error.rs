use tokenizer::ErrorKind;

#[derive(thiserror::Error)]
pub enum Error {
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("pipeline stopped at the {stage} stage")]
    Tokenizer {
        stage: &'static str,
        #[source]
        source: tokenizer::Error,
    },
    #[error("unable to serialize the report as json")]
    Json(#[from] serde_json::Error),
    #[error("unable to serialize the report as yaml")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config file error")]
    ConfigFile(#[from] config_file::ConfigFileError),
    #[error("unable to install the Ctrl-C handler")]
    Signal(#[from] ctrlc::Error),
        #[error("interrupted by the user")]
    Interrupted,
}

impl From<tokenizer::Error> for Error {
    fn from(source: tokenizer::Error) -> Self {
        let stage = match source.kind() {
            ErrorKind::Input => "input",
            ErrorKind::ResourceUnavailable => "resource loading",
            ErrorKind::Alignment => "alignment",
        };

        Self::Tokenizer { stage, source }
    }
}

pub(crate) fn format_error(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter,
) -> std::fmt::Result {
    write!(f, "{e}")?;

    let mut source = e.source();

    if e.source().is_some() {
        writeln!(f, "\ncaused by:")?;
        let mut i: usize = 0;
        while let Some(inner) = source {
            writeln!(f, "{i: >5}: {inner}")?;
            source = inner.source();
            i += 1;
        }
    }

    Ok(())
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_error(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_failing_stage_and_its_cause() {
        let err: Error = tokenizer::Error::EmptyBatch.into();
        let rendered = format!("{err:?}");

        assert!(rendered.starts_with("pipeline stopped at the alignment stage"));
        assert!(rendered.contains("caused by:"));
        assert!(rendered.contains("cannot align an empty batch"));
    }
}
