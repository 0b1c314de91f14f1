use std::path::{Path, PathBuf};

use config_file::FromConfigFile;
use serde::Deserialize;
use tokenizer::{PipelineConfig, SpecialTokens, DEFAULT_LANGUAGE};

use crate::args::{Globals, Output};
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct Specials {
    pub unk: Option<String>,
    pub pad: Option<String>,
    pub bos: Option<String>,
    pub eos: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    // Segmentation
    pub language: Option<String>,
    pub vocab: Option<String>,
    pub word_rules: Option<String>,
    pub specials: Option<Specials>,

    // Presentation
    pub output: Option<Output>,
    pub clear: Option<bool>,
}

impl Config {
    /// Reads the config file, or returns an empty config if there is none.
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_home(path);
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }

        log::info!("loading config file {}", path.display());
        Ok(Self::from_config_file(&path)?)
    }
}

/// Flags merged over the config file.
#[derive(Debug)]
pub struct Settings {
    pub text: Option<String>,
    pub vocab: Option<PathBuf>,
    pub output: Output,
    pub clear: bool,
    pub pipeline: PipelineConfig,
}

impl Settings {
    pub fn resolve(globals: Globals, config: Config) -> Self {
        let file = config.specials.unwrap_or_default();
        let defaults = SpecialTokens::default();
        let specials = SpecialTokens {
            unknown: globals.unk.or(file.unk).unwrap_or(defaults.unknown),
            pad: globals.pad.or(file.pad).unwrap_or(defaults.pad),
            bos: globals.bos.or(file.bos).unwrap_or(defaults.bos),
            eos: globals.eos.or(file.eos).unwrap_or(defaults.eos),
        };

        Self {
            text: globals.text,
            vocab: globals.vocab.or(config.vocab).map(|p| expand_home(&p)),
            output: globals.output.or(config.output).unwrap_or_default(),
            clear: !globals.no_clear && config.clear.unwrap_or(true),
            pipeline: PipelineConfig {
                language: globals
                    .language
                    .or(config.language)
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                word_rules: globals.word_rules.or(config.word_rules).map(|p| expand_home(&p)),
                specials,
            },
        }
    }
}

/// Replaces a leading `~` with the `HOME` directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix('~'), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => Path::new(&home).join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;
    use crate::args::Args;

    fn globals(argv: &[&str]) -> Globals {
        let mut full = vec!["t"];
        full.extend_from_slice(argv);
        Args::parse_from(full).globals
    }

    #[test]
    fn flags_override_the_config_file() {
        let config = Config {
            language: Some("french".into()),
            output: Some(Output::Yaml),
            specials: Some(Specials {
                pad: Some("[PAD]".into()),
                eos: Some("</s>".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let settings = Settings::resolve(globals(&["-l", "english", "--eos", "[SEP]"]), config);

        assert_eq!(settings.pipeline.language, "english");
        assert_eq!(settings.output, Output::Yaml);
        assert_eq!(settings.pipeline.specials.pad, "[PAD]");
        assert_eq!(settings.pipeline.specials.eos, "[SEP]");
        assert_eq!(settings.pipeline.specials.unknown, "<unk>");
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let settings = Settings::resolve(globals(&[]), Config::default());

        assert_eq!(settings.pipeline.language, DEFAULT_LANGUAGE);
        assert_eq!(settings.output, Output::Raw);
        assert!(settings.clear);
        assert!(settings.vocab.is_none());
        assert_eq!(settings.pipeline.specials, SpecialTokens::default());
    }

    #[test]
    fn no_clear_wins_over_the_file() {
        let config = Config {
            clear: Some(true),
            ..Default::default()
        };
        assert!(!Settings::resolve(globals(&["--no-clear"]), config).clear);
    }

    #[test]
    fn missing_config_file_is_empty() {
        let config = Config::load("/nonexistent/t.toml").expect("missing file is not an error");
        assert!(config.language.is_none());
    }

    #[test]
    fn reads_toml_config_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "language = \"english\"\noutput = \"json\"\n\n[specials]\npad = \"[PAD]\""
        )
        .expect("write config");

        let path = file.path().to_string_lossy().to_string();
        let config = Config::load(&path).expect("config parses");

        assert_eq!(config.language.as_deref(), Some("english"));
        assert_eq!(config.output, Some(Output::Json));
        assert_eq!(
            config.specials.and_then(|s| s.pad).as_deref(),
            Some("[PAD]")
        );
    }

    #[test]
    fn expands_the_home_directory() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expand_home("~/.config/t.toml"), Path::new(&home).join(".config/t.toml"));
        }
        assert_eq!(expand_home("/etc/t.toml"), PathBuf::from("/etc/t.toml"));
    }
}
