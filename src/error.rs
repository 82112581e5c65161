// src/error.rs

use crate::system::{executor::ExecutionError, http::HttpError};
use std::path::PathBuf;
use thiserror::Error;

/// Every failure a user can see. Each one is printed to stderr and ends the
/// process with exit status 1.
#[derive(Error, Debug)]
pub enum CommandError {
    // --- Option parsing ---
    /// An option token no definition matches.
    #[error("{0}: unknown option.")]
    UnknownOption(String),
    /// A value-taking option was given without its value.
    #[error("{0}: argument required.")]
    MissingArgument(String),
    /// A flag was given a value (`--help=yes`).
    #[error("{0}: unexpected argument.")]
    UnexpectedArgument(String),
    /// A token that starts with `--` but is not `--name[=value]`.
    #[error("{0}: invalid option format.")]
    InvalidOptionFormat(String),

    // --- Positional arguments ---
    /// No reference was given.
    #[error("{script}: argument required (github:<USER>/<REPO> or file:<PATH>).")]
    MissingReference {
        /// Program name as invoked.
        script: String,
    },
    /// A reference was given but no target directory.
    #[error("{script}: target directory required.")]
    MissingTargetDirectory {
        /// Program name as invoked.
        script: String,
    },

    // --- Reference resolution ---
    /// The reference has no schema, or does not fit its schema's pattern.
    #[error("{reference}: {reason}")]
    InvalidReferenceFormat {
        /// The reference as given.
        reference: String,
        /// What was expected instead.
        reason: &'static str,
    },
    /// The reference's schema is not registered.
    #[error("{0}: unknown schema.")]
    UnknownSchema(String),
    /// The GitHub release listing could not be fetched.
    #[error("{repo}: repository not found.\n  (api: GET {api_url})\n  (Hint: {hint})")]
    RepositoryNotFound {
        /// Repository name as given, without the suffix.
        repo: String,
        /// The listing URL that was queried.
        api_url: String,
        /// Advice that depends on whether `-B` was given.
        hint: &'static str,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },
    /// The listing body is not a list of releases.
    #[error("Failed to parse release list from {api_url}")]
    InvalidReleaseListing {
        /// The listing URL that was queried.
        api_url: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The latest release has nothing to download.
    #[error("can't find zip file under github.com/{user}/{repo}/releases")]
    NoDownloadableAsset {
        /// Repository owner.
        user: String,
        /// Repository name as given.
        repo: String,
    },

    // --- Retrieval and extraction ---
    /// Fetching the archive itself failed.
    #[error("Download from {url} failed")]
    DownloadFailed {
        /// The archive URL.
        url: String,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },
    /// The archive's extension is not one the extractor knows.
    #[error("{}: expected '*.zip', '*.tgz' or '*.tar.{{gz,bz2,xz}}'", .0.display())]
    UnsupportedArchiveFormat(PathBuf),
    /// The archive tool exited with a non-zero status.
    #[error("'{tool}' could not extract {}.", .archive.display())]
    ExtractionFailed {
        /// `unzip` or `tar`.
        tool: &'static str,
        /// The archive being extracted.
        archive: PathBuf,
    },
    /// The target directory is the working directory or one of its parents.
    #[error("'{}': refusing to replace a directory that contains the working directory.", .0.display())]
    UnsafeTarget(PathBuf),
    /// A filesystem operation failed.
    #[error("Failed to {action} '{}'", .path.display())]
    Filesystem {
        /// What was being done (`remove`, `move`, ...).
        action: &'static str,
        /// The path it was done to.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An external tool could not be started.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CommandError {
    /// Wraps an I/O error with the filesystem action that produced it.
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
