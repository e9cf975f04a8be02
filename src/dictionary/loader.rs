//! Dictionary loading utilities
//!
//! Provides functions to load a dictionary from a word list file.

use super::Dictionary;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Load a dictionary from a file with one word per line
///
/// Blank lines are ignored; lines that are not a single word of ASCII letters
/// are skipped with a warning.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use spellcast_solver::dictionary::loader::load_from_file;
///
/// let dictionary = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", dictionary.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Dictionary> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let dictionary = dictionary_from_text(&content);

    debug!(
        "loaded {} words from {}",
        dictionary.len(),
        path.display()
    );
    Ok(dictionary)
}

/// Build a dictionary from newline-separated text
#[must_use]
pub fn dictionary_from_text(content: &str) -> Dictionary {
    let mut skipped = 0usize;

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let valid = line.bytes().all(|b| b.is_ascii_alphabetic());
            if !valid {
                skipped += 1;
            }
            valid
        })
        .collect();

    if skipped > 0 {
        warn!("skipped {skipped} dictionary lines that are not plain words");
    }

    Dictionary::new(words)
}
