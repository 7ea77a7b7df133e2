//! Error and advisory types for deck writing.
//!
//! Fatal errors abort the whole write before any output reaches the
//! destination; advisories are collected, mirrored through the `log`
//! facade, and never alter the result beyond the documented skip or
//! migration behavior.

use std::error::Error;
use std::fmt;
use std::io;

use crate::config::FormatVersion;

/// Fatal deck-writing errors. No partial deck is ever produced when one
/// of these is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteError {
    /// The configuration defines no materials (ROCKS is mandatory).
    MissingRocks,
    /// The configuration has no numerical options (PARAM is mandatory).
    MissingOptions,
    /// The selected physical model name is not a registry key.
    UnknownEos {
        /// The unrecognized model name.
        name: String,
    },
    /// `rocks_order` names a material that is not defined.
    UnknownRock {
        /// The unresolved material name.
        name: String,
    },
    /// A per-component generator attribute array does not match the
    /// component count.
    ComponentMismatch {
        /// Generator entity name.
        generator: String,
        /// Offending attribute.
        attribute: &'static str,
        /// Component count from the type-code list.
        expected: usize,
        /// Supplied array length.
        actual: usize,
    },
    /// A generator supplies a time table but no rate table.
    MissingRates {
        /// Generator entity name.
        generator: String,
    },
    /// A generator table does not match the time table's length.
    TableLengthMismatch {
        /// Generator entity name.
        generator: String,
        /// Offending attribute.
        attribute: &'static str,
        /// Time table length.
        expected: usize,
        /// Supplied table length.
        actual: usize,
    },
    /// A generator time table has fewer than two entries.
    TableTooShort {
        /// Generator entity name.
        generator: String,
        /// Supplied table length.
        len: usize,
    },
    /// A generator attribute must be scalar when no time table is given.
    ScalarRequired {
        /// Generator entity name.
        generator: String,
        /// Offending attribute.
        attribute: &'static str,
    },
    /// A per-component generator cannot carry a time table.
    TimesNotAllowed {
        /// Generator entity name.
        generator: String,
    },
    /// An explicit time step table is empty.
    EmptyTimeSteps,
    /// A diffusion table is supplied but no physical model resolves the
    /// phase count to check it against.
    DiffusionRequiresEos,
    /// A diffusion table row does not match the resolved phase count.
    DiffusionShape {
        /// Offending row (`"mass1"` or `"mass2"`).
        row: &'static str,
        /// Resolved phase count.
        expected: usize,
        /// Supplied row length.
        actual: usize,
    },
    /// An output variable carries more than two column specifiers.
    OutputArity {
        /// Variable name.
        variable: String,
        /// Supplied specifier count.
        len: usize,
    },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRocks => write!(f, "block ROCKS (key 'rocks') is not defined"),
            Self::MissingOptions => write!(f, "block PARAM (key 'options') is not defined"),
            Self::UnknownEos { name } => {
                write!(f, "physical model '{name}' is unknown or not supported")
            }
            Self::UnknownRock { name } => {
                write!(f, "rocks_order entry '{name}' is not a defined material")
            }
            Self::ComponentMismatch {
                generator,
                attribute,
                expected,
                actual,
            } => write!(
                f,
                "generator '{generator}': '{attribute}' has {actual} entries, \
                 expected {expected} (one per component)"
            ),
            Self::MissingRates { generator } => {
                write!(f, "generator '{generator}': time table requires a rate table")
            }
            Self::TableLengthMismatch {
                generator,
                attribute,
                expected,
                actual,
            } => write!(
                f,
                "generator '{generator}': '{attribute}' table has {actual} entries, \
                 expected {expected} (the time table length)"
            ),
            Self::TableTooShort { generator, len } => write!(
                f,
                "generator '{generator}': time table needs at least 2 entries, got {len}"
            ),
            Self::ScalarRequired {
                generator,
                attribute,
            } => write!(
                f,
                "generator '{generator}': '{attribute}' must be scalar without a time table"
            ),
            Self::TimesNotAllowed { generator } => write!(
                f,
                "generator '{generator}': per-component generators cannot carry a time table"
            ),
            Self::EmptyTimeSteps => write!(f, "explicit time step table is empty"),
            Self::DiffusionRequiresEos => {
                write!(f, "diffusion table supplied without a physical model")
            }
            Self::DiffusionShape {
                row,
                expected,
                actual,
            } => write!(
                f,
                "diffusion row '{row}' has {actual} coefficients, expected {expected} \
                 (one per phase)"
            ),
            Self::OutputArity { variable, len } => write!(
                f,
                "output variable '{variable}' has {len} column specifiers, at most 2 allowed"
            ),
        }
    }
}

impl Error for WriteError {}

/// Non-fatal configuration advisories. These are returned alongside the
/// deck text and mirrored through `log::warn!`; they never fail a write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// The default initial conditions were found under the numerical
    /// options (deprecated layout) and migrated into the default record.
    LegacyIncon,
    /// Domain-specific initial conditions are defined but the flexible
    /// initialization flag (`start`) is not set; the simulator will
    /// ignore the INDOM data.
    StartNotSet,
    /// A block was requested that the target format version does not
    /// support; it was skipped.
    VersionSkip {
        /// Keyword of the skipped block.
        keyword: &'static str,
        /// The configured format version.
        version: FormatVersion,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegacyIncon => write!(
                f,
                "defining 'incon' in the numerical options is deprecated, \
                 define it in the default record"
            ),
            Self::StartNotSet => write!(
                f,
                "option START is needed for domain-specific initial conditions (INDOM)"
            ),
            Self::VersionSkip { keyword, version } => write!(
                f,
                "block {keyword} is not available for {version:?}, skipping"
            ),
        }
    }
}

/// Errors from [`write_file`](../tephra_deck/fn.write_file.html): either a
/// deck encoding failure or a sink I/O failure. The destination file is
/// only created once encoding has fully succeeded.
#[derive(Debug)]
pub enum FileError {
    /// Encoding failed; nothing was written.
    Deck(WriteError),
    /// The destination could not be written.
    Io(io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deck(e) => write!(f, "deck: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl Error for FileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Deck(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<WriteError> for FileError {
    fn from(e: WriteError) -> Self {
        Self::Deck(e)
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_display_names_the_entity() {
        let err = WriteError::ComponentMismatch {
            generator: "WEL 1".to_string(),
            attribute: "rates",
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("WEL 1"));
        assert!(msg.contains("rates"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn advisory_display_mentions_keyword() {
        let adv = Advisory::VersionSkip {
            keyword: "MOMOP",
            version: FormatVersion::Tough2,
        };
        assert!(adv.to_string().contains("MOMOP"));
    }

    #[test]
    fn file_error_sources_chain() {
        let err = FileError::from(WriteError::MissingRocks);
        assert!(err.source().is_some());
    }
}
