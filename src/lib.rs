//! Downloads a boilerplate archive from a GitHub release or a local file,
//! expands it into a new project directory and runs its initializer script.

include!(concat!(env!("OUT_DIR"), "/messages.rs"));

/// Command-line front end.
pub mod cli;
/// Compile-time tables.
pub mod constants;
/// Option parsing, schema dispatch and the boilerplate pipeline.
pub mod core;
/// User-facing errors.
pub mod error;
/// External processes, HTTP and the filesystem.
pub mod system;

#[cfg(test)]
pub(crate) mod testing;
