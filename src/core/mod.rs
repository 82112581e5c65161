// src/core/mod.rs

/// Archive format detection.
pub mod archive;
/// `github:` references.
pub mod github_release;
/// `__init.*` script dispatch.
pub mod initializer;
/// `file:` references.
pub mod local_file;
/// The shared resolve / download / extract / initialize pipeline.
pub mod operation;
/// Declarative command-line option parsing.
pub mod option_parser;
/// Reference schema registry.
pub mod schema;
