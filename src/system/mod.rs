//! # System Interaction Layer
//!
//! The collaborators the core pipeline relies on but does not implement itself.
//!
//! ## Modules
//!
//! - **`executor`**: spawns external programs (`unzip`, `tar`, initializer interpreters)
//!   behind the [`executor::ToolRunner`] trait, and echoes shell-equivalent steps.
//! - **`fs_ops`**: filesystem primitives (recursive remove, rename, directory listing)
//!   scoped to a [`fs_ops::WorkDir`].
//! - **`http`**: blocking HTTP GET behind the [`http::HttpClient`] trait, backed by `ureq`.

/// External programs.
pub mod executor;
/// Filesystem primitives.
pub mod fs_ops;
/// HTTP GET.
pub mod http;
