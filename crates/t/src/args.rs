use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// The sentence to tokenize. Prompts for it when missing.
    pub text: Option<String>,

    /// Language of the word segmentation rules (english, spanish, french).
    #[clap(short, long, env = "T_LANGUAGE")]
    pub language: Option<String>,

    /// Path to a WordPiece `vocab.txt`. Uses the embedded vocabulary when missing.
    #[clap(long, env = "T_VOCAB")]
    pub vocab: Option<String>,

    /// Path to a JSON file with word segmentation rules.
    #[clap(long, env = "T_WORD_RULES")]
    pub word_rules: Option<String>,

    /// Unknown token.
    #[clap(long, env = "T_UNK")]
    pub unk: Option<String>,

    /// Padding token.
    #[clap(long, env = "T_PAD")]
    pub pad: Option<String>,

    /// Begin of sequence token.
    #[clap(long, env = "T_BOS")]
    pub bos: Option<String>,

    /// End of sequence token.
    #[clap(long, env = "T_EOS")]
    pub eos: Option<String>,

    /// Output format.
    #[clap(short, long, env = "T_OUTPUT", value_enum)]
    pub output: Option<Output>,

    /// Don't clear the screen before printing.
    #[clap(long, env = "T_NO_CLEAR")]
    pub no_clear: bool,

    /// Config file
    #[clap(long, env = "T_CONFIG_FILE", default_value = "~/.config/t.toml")]
    pub config_file: String,
}

#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Raw,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "t")]
#[command(about = "Compare word, character and subword tokenization from the terminal")]
pub struct Args {
    #[clap(flatten)]
    pub globals: Globals,
}
