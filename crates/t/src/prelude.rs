use std::io::{BufRead, Write};

pub use crate::args::{Args, Output};
pub use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Prints `message` and reads one line. End of input counts as an
/// interruption.
pub fn prompt(message: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Interrupted);
    }

    Ok(line.trim().to_string())
}

/// Restores the cursor and reports the interruption.
pub fn interrupted(output: &mut impl Write) -> Result<()> {
    crossterm::execute!(output, crossterm::cursor::Show)?;
    writeln!(output, "\nInterrupted by the user.")?;
    output.flush()?;
    Ok(())
}

/// Exits quietly on Ctrl-C, the same way an interrupted prompt does.
pub fn handle_ctrl_c() -> Result<()> {
    ctrlc::set_handler(|| {
        log::info!("received Ctrl+C signal");
        if let Err(e) = interrupted(&mut std::io::stdout()) {
            eprintln!("failed to report the interruption: {e:?}");
        }
        std::process::exit(0);
    })?;
    Ok(())
}

/// Clears the terminal and moves the cursor home.
pub fn clear_screen() -> Result<()> {
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    )?;
    Ok(())
}
