// src/core/archive.rs

use crate::{constants::SUPPORTED_ARCHIVE_EXTENSIONS, error::CommandError};
use std::path::Path;

/// How an archive is unpacked, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `.zip`: unpacked by `unzip` into a scratch directory, then normalized.
    Zip,
    /// `.tgz`, `.tar.gz`, `.tar.bz2`, `.tar.xz`: unpacked by `tar` in place.
    Tar,
}

impl ArchiveKind {
    /// Classifies `archive` and returns its file name with the extension removed.
    ///
    /// Only the file name is considered, so `dl/app-1.0.tar.gz` gives `app-1.0`.
    pub fn detect(archive: &Path) -> Result<(Self, String), CommandError> {
        let unsupported = || CommandError::UnsupportedArchiveFormat(archive.to_path_buf());
        let file_name = archive
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(unsupported)?;

        let (base, extension) = SUPPORTED_ARCHIVE_EXTENSIONS
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext).map(|base| (base, *ext)))
            .ok_or_else(unsupported)?;

        let kind = if extension == ".zip" { Self::Zip } else { Self::Tar };
        Ok((kind, base.to_string()))
    }

    /// The external tool that unpacks this kind.
    pub fn tool(self) -> &'static str {
        match self {
            Self::Zip => "unzip",
            Self::Tar => "tar",
        }
    }
}
