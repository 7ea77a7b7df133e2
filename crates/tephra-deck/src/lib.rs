//! Fixed-column input deck writer for TOUGH-style reservoir simulators.
//!
//! The crate turns a [`Simulation`] configuration into the simulator's
//! 80-column deck text. Encoding is all-or-nothing: every cross-field
//! check runs before a single record is produced, so a failed write never
//! leaves a partial deck behind.
//!
//! ```
//! use tephra_core::{Options, Rock, Simulation};
//!
//! let mut sim = Simulation::default();
//! sim.title = "Five-spot injection".to_string();
//! sim.rocks.insert("SAND ".to_string(), Rock::default());
//! sim.options = Some(Options::default());
//!
//! let deck = tephra_deck::write(&sim).unwrap();
//! assert!(deck.text.contains("ROCKS"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fmt;
pub mod record;

mod blocks;
mod resolve;
mod write;

pub use tephra_core::{Advisory, FileError, Simulation, WriteError};
pub use write::{write, write_file, DeckText};
