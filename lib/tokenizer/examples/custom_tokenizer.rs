//! Every stage of the pipeline can be used on its own. This example loads a
//! BERT `vocab.txt` (pass its path as the first argument, or fall back to the
//! embedded vocabulary), segments a sentence and builds a vocabulary with
//! frequency ordering instead of first occurrence.

use tokenizer::{
    pad_to_max_length, CharSegmenter, SequenceIndexer, SpecialTokens, SubwordSegmenter, Text,
    TokenOrder, VocabularyBuilder, WordPieceModel, WordSegmenter,
};

fn main() -> Result<(), tokenizer::Error> {
    let model = match std::env::args().nth(1) {
        Some(path) => WordPieceModel::from_path(path)?,
        None => WordPieceModel::embedded()?,
    };

    let specials = SpecialTokens::default();
    let text = Text::new("I can't believe the cats ran that fast... again!")?;

    let words = WordSegmenter::for_language("english")?.segment(&text);
    let chars = CharSegmenter::new().segment(&text);
    let subword = SubwordSegmenter::new(Box::new(model), &specials).segment(&text);

    let vocab = VocabularyBuilder::new(specials.unknown.as_str())
        .specials(specials.ordered())
        .order(TokenOrder::Frequency)
        .build([&subword.bracketed]);
    let ids = SequenceIndexer::new(&vocab).index(&subword.bracketed);

    println!("Words: {:?}", words);
    println!("Pieces: {:?}", subword.pieces);
    println!("Ids: {:?}", ids);
    for entry in vocab.entries() {
        println!("{:>4} {}", entry.id, entry.token);
    }

    let batch = pad_to_max_length(&[words, chars, subword.pieces], &specials.pad)?;
    println!("Lengths {:?} padded to {}", batch.lengths, batch.target_length);

    Ok(())
}
