//! Deck assembly: validation gate, encoding, and the file sink.

use std::fs;
use std::path::Path;

use tephra_core::{Advisory, FileError, Simulation, WriteError};

use crate::blocks::{self, Inclusion};
use crate::record::record;
use crate::resolve::Deck;

/// A fully-encoded deck plus the advisories raised while producing it.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckText {
    /// The complete deck, newline-terminated records.
    pub text: String,
    /// Non-fatal advisories, in the order they were raised.
    pub advisories: Vec<Advisory>,
}

/// Encode a configuration into a deck.
///
/// All cross-field validation runs before any block is encoded: either
/// the whole deck is produced, or an error is returned and no output
/// exists. The input is never mutated.
///
/// # Errors
///
/// Any [`WriteError`] raised by the merge resolver or by a block
/// validator; see the error type for the full catalogue.
pub fn write(sim: &Simulation) -> Result<DeckText, WriteError> {
    let mut advisories = Vec::new();
    let deck = Deck::resolve(sim, &mut advisories)?;

    // Evaluate inclusion once; version skips are advisories, not errors.
    let mut included = Vec::new();
    for spec in blocks::SEQUENCE {
        match (spec.include)(&deck) {
            Inclusion::Include => included.push(spec),
            Inclusion::Omit => {}
            Inclusion::Skip(advisory) => {
                log::warn!("{advisory}");
                advisories.push(advisory);
            }
        }
    }

    // Validation gate: every included block checks its input before any
    // record is encoded.
    for spec in &included {
        (spec.validate)(&deck)?;
    }

    let mut text = String::new();
    text.push_str(&record([deck.sim.title.clone()]));
    for spec in &included {
        text.push_str(&blocks::header(spec.keyword));
        for line in (spec.encode)(&deck) {
            text.push_str(&line);
        }
        if spec.multi && !spec.terminal {
            text.push('\n');
        }
    }

    log::debug!(
        "encoded deck: {} blocks, {} bytes, {} advisories",
        included.len(),
        text.len(),
        advisories.len()
    );
    Ok(DeckText { text, advisories })
}

/// Encode a configuration and write it to `path`.
///
/// The destination is only touched after the whole deck has been encoded;
/// a validation failure leaves no file behind.
///
/// # Errors
///
/// [`FileError::Deck`] for encoding failures, [`FileError::Io`] when the
/// destination cannot be written.
pub fn write_file<P: AsRef<Path>>(path: P, sim: &Simulation) -> Result<DeckText, FileError> {
    let deck = write(sim)?;
    fs::write(path, &deck.text)?;
    Ok(deck)
}
