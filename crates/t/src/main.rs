use clap::Parser;
use tokenizer::{Pipeline, WordPieceModel};

mod args;
mod config;
mod error;
mod prelude;
mod printer;

use crate::config::{Config, Settings};
use crate::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    handle_ctrl_c()?;

    let args = Args::parse();
    let config = Config::load(&args.globals.config_file)?;
    let settings = Settings::resolve(args.globals, config);
    log::info!("settings: {:#?}", settings);

    match run(settings) {
        Err(Error::Interrupted) => interrupted(&mut std::io::stdout()),
        result => result,
    }
}

fn run(settings: Settings) -> Result<()> {
    let model = match &settings.vocab {
        Some(path) => WordPieceModel::from_path(path)?,
        None => WordPieceModel::embedded()?,
    };
    let pipeline = Pipeline::new(settings.pipeline, Box::new(model))?;

    let interactive = settings.output == Output::Raw && atty::is(atty::Stream::Stdout);
    let clear = settings.clear && interactive;

    let text = match settings.text {
        Some(text) => text,
        None => {
            if clear {
                clear_screen()?;
            }
            println!("Tokenization demo (Word / Char / Subword)\n");
            prompt(
                "Type a sentence and press Enter: ",
                &mut std::io::stdin().lock(),
                &mut std::io::stdout(),
            )?
        }
    };

    if text.trim().is_empty() {
        println!("\nNo text was entered. Exiting.");
        return Ok(());
    }

    let report = pipeline.run(&text)?;
    log::debug!("report: {:#?}", report);

    if clear {
        clear_screen()?;
    }

    let printer = printer::Printer::new();
    println!("{}", printer.print(&report, settings.output)?);

    Ok(())
}
