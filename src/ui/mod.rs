//! Terminal front end helpers

mod progress;

pub use progress::PhaseReporter;

use console::Term;
use std::io;

/// Ask a yes/no question on the terminal, re-prompting until the answer is
/// one of y/yes/n/no (case-insensitive).
pub fn confirm(term: &Term, question: &str) -> io::Result<bool> {
    loop {
        term.write_str(question)?;
        let input = term.read_line()?;
        if let Some(answer) = parse_yes_no(&input) {
            return Ok(answer);
        }
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
