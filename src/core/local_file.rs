// src/core/local_file.rs

use crate::{
    core::{
        operation::{DownloadTarget, Operation},
        option_parser::ParsedOptions,
    },
    error::CommandError,
    system::fs_ops::WorkDir,
};
use std::path::{Path, PathBuf};

/// `file:<path>`: an archive already on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFile;

impl LocalFile {
    /// The reference prefix handled by this operation.
    pub const SCHEMA: &'static str = "file:";
}

impl Operation for LocalFile {
    fn schema(&self) -> &'static str {
        Self::SCHEMA
    }

    fn resolve(
        &self,
        reference: &str,
        _options: &ParsedOptions,
    ) -> Result<DownloadTarget, CommandError> {
        let path = reference
            .strip_prefix(Self::SCHEMA)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| CommandError::InvalidReferenceFormat {
                reference: reference.to_string(),
                reason: "unexpected format (expected 'file:<PATH>').",
            })?;

        let suggested_filename = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        Ok(DownloadTarget {
            location: path.to_string(),
            suggested_filename,
        })
    }

    /// Nothing to fetch: the location is the archive.
    fn download(
        &self,
        target: &DownloadTarget,
        workdir: &WorkDir,
    ) -> Result<PathBuf, CommandError> {
        Ok(workdir.resolve(&target.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_path_verbatim() {
        let target = LocalFile
            .resolve("file:./dl/keight-ruby.tar.gz", &ParsedOptions::default())
            .unwrap();
        assert_eq!(target.location, "./dl/keight-ruby.tar.gz");
        assert_eq!(target.suggested_filename, "keight-ruby.tar.gz");
    }

    #[test]
    fn test_resolve_rejects_other_formats() {
        for reference in ["file:", "github:kwatch/hello-ruby", "/tmp/a.zip"] {
            let err = LocalFile
                .resolve(reference, &ParsedOptions::default())
                .unwrap_err();
            assert!(
                matches!(err, CommandError::InvalidReferenceFormat { .. }),
                "{} should be rejected",
                reference
            );
        }
    }

    #[test]
    fn test_download_is_identity_under_workdir() {
        let workdir = WorkDir::new("/work");
        let target = DownloadTarget {
            location: "app.zip".to_string(),
            suggested_filename: "app.zip".to_string(),
        };
        let path = LocalFile.download(&target, &workdir).unwrap();
        assert_eq!(path, PathBuf::from("/work/app.zip"));

        let absolute = DownloadTarget {
            location: "/tmp/app.zip".to_string(),
            suggested_filename: "app.zip".to_string(),
        };
        let path = LocalFile.download(&absolute, &workdir).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/app.zip"));
    }
}
