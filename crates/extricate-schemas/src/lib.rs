//! Schema definitions for extricate's input and output formats.
//!
//! This crate contains the data structures that cross extricate's process
//! boundaries: the workspace snapshot produced by the compiler front end
//! (projects, declared references, and resolved symbol information for one
//! or more analyzed methods) and the dependency report produced by the
//! resolution phase.
//!
//! The schemas are designed to be:
//! - **Self-contained**: a snapshot carries everything one resolution run
//!   needs, so the resolver never touches project files or a compiler
//! - **Stable**: serialized JSON is the contract between the front end and
//!   the resolver
//! - **Shared**: used by both the resolution crate and the CLI

mod report;
mod workspace_snapshot;

#[doc(inline)]
pub use report::*;
#[doc(inline)]
pub use workspace_snapshot::*;
