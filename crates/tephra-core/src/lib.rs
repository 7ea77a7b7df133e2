//! Core types for the Tephra deck writer.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! configuration model for a TOUGH-style reservoir simulation, the
//! process-wide defaults registry, the layered default-merge resolver,
//! and the error/advisory taxonomy shared across the workspace.
//!
//! Nothing in this crate performs any encoding; see `tephra-deck` for the
//! fixed-column serializer that consumes these types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod gener;
pub mod rock;

pub use config::{
    Diffusion, Flac, FormatVersion, Momop, Mop, Options, Output, Selections, Simulation, Solver,
    TimeSteps,
};
pub use error::{Advisory, FileError, WriteError};
pub use gener::{GenKind, GenValue, Generator};
pub use rock::{Incon, ModelRecord, Permeability, Rock, RockField, NO_CASCADE};
