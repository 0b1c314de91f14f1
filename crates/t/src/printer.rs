use std::fmt::Write;

use crossterm::terminal;
use tokenizer::Report;

use crate::prelude::*;

const DEFAULT_WIDTH: usize = 100;
const SEPARATOR: &str = " | ";
const INDENT: usize = 2;

/// Renders a [`Report`] for a human reader, or serializes it.
pub struct Printer {
    term_width: usize,
}

impl Printer {
    pub fn new() -> Self {
        let term_width = terminal::size()
            .map(|(columns, _)| columns as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Self::with_width(term_width)
    }

    pub fn with_width(term_width: usize) -> Self {
        Self {
            term_width: term_width.max(20),
        }
    }

    pub fn print(&self, report: &Report, output: Output) -> Result<String> {
        match output {
            Output::Raw => Ok(self.render(report)),
            Output::Json => Ok(serde_json::to_string_pretty(report)?),
            Output::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();

        self.title(&mut out, &format!("Word-based ({})", report.language));
        self.list(&mut out, "Tokens", &report.word);

        self.title(&mut out, "Character-based");
        self.list(&mut out, "Tokens", &report.chars);

        self.title(
            &mut out,
            &format!("Subword-based ({}) + specials + vocab", report.model),
        );
        self.list(&mut out, "Tokens", &report.subword.bracketed);
        let ids: Vec<String> = report.ids.iter().map(|id| id.to_string()).collect();
        self.list(&mut out, "IDs   ", &ids);

        out.push('\n');
        let rows: Vec<Vec<String>> = report
            .vocabulary
            .entries()
            .map(|entry| vec![entry.id.to_string(), entry.token])
            .collect();
        table(&mut out, &["ID", "Token"], &rows);

        let padded = &report.padded;
        self.title(
            &mut out,
            &format!("Padding demo (target length = {})", padded.target_length),
        );
        let labels = ["Word-based    padded", "Character     padded", "Subword-based padded"];
        for (label, sequence) in labels.iter().zip(&padded.sequences) {
            self.list(&mut out, label, sequence);
        }

        self.title(&mut out, "Summary");
        let views = ["Word-based", "Character-based", "Subword-based"];
        let rows: Vec<Vec<String>> = views
            .iter()
            .zip(&padded.lengths)
            .map(|(view, count)| vec![view.to_string(), count.to_string()])
            .collect();
        table(&mut out, &["View", "Tokens"], &rows);

        out
    }

    fn title(&self, out: &mut String, title: &str) {
        let bar = "─".repeat(title.chars().count().min(self.term_width));
        let _ = write!(out, "\n{title}\n{bar}\n");
    }

    /// `label: a | b | c`, wrapped at the terminal width without splitting
    /// tokens.
    fn list(&self, out: &mut String, label: &str, items: &[String]) {
        let mut line = format!("{label}: ");
        let mut width = line.chars().count();
        let mut first = true;

        for item in items {
            let piece = if first {
                item.clone()
            } else {
                format!("{SEPARATOR}{item}")
            };
            let piece_width = piece.chars().count();

            if !first && width + piece_width > self.term_width {
                out.push_str(line.trim_end());
                out.push('\n');
                line = " ".repeat(INDENT);
                line.push_str(item);
                width = INDENT + item.chars().count();
            } else {
                line.push_str(&piece);
                width += piece_width;
            }
            first = false;
        }

        out.push_str(&line);
        out.push('\n');
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Left aligned columns separated by ` | `, with a `-+-` rule under the header.
fn table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    };

    out.push_str(&format_row(headers.to_vec()));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
}
