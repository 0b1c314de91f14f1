//! The library comes with a `Pipeline`, which chains the word, character and
//! subword segmenters, builds the vocabulary and pads the three sequences.
//! The embedded WordPiece vocabulary makes it usable without downloading a
//! pretrained model.
//!
//! > Run it with `cargo run --example default_tokenizer -- "your sentence"`.
use tokenizer::{Pipeline, PipelineConfig, WordPieceModel};

fn main() -> Result<(), tokenizer::Error> {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "¿Dónde está el gato? El gato corre rápido.".to_string());

    let model = WordPieceModel::embedded()?;
    let pipeline = Pipeline::new(PipelineConfig::default(), Box::new(model))?;
    let report = pipeline.run(&text)?;

    println!("Original text: {}", report.text);
    println!("Word tokens: {:?}", report.word);
    println!("Char tokens: {:?}", report.chars);
    println!("Subword tokens: {:?}", report.subword.bracketed);
    println!("Subword ids: {:?}", report.ids);
    println!("Padded length: {}", report.padded.target_length);

    Ok(())
}
