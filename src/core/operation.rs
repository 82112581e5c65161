// src/core/operation.rs

//! The boilerplate pipeline: resolve a reference, retrieve the archive,
//! extract it into the target directory and run its initializer.
//!
//! Only `resolve` and `download` depend on the schema, so they sit behind the
//! [`Operation`] trait. Extraction and initializer dispatch are shared and live
//! on [`Pipeline`].

use crate::{
    core::{archive::ArchiveKind, initializer, option_parser::ParsedOptions},
    error::CommandError,
    system::{
        executor::{self, ToolRunner},
        fs_ops::WorkDir,
    },
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Where to fetch a boilerplate from, and the file name to store it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// A URL, or a local path for schemas that need no download.
    pub location: String,
    /// File name the archive is saved under in the working directory.
    pub suggested_filename: String,
}

/// The schema-specific half of the pipeline.
pub trait Operation {
    /// The reference prefix this operation handles, colon included (`"github:"`).
    fn schema(&self) -> &'static str;

    /// Turns a reference into a download target.
    fn resolve(
        &self,
        reference: &str,
        options: &ParsedOptions,
    ) -> Result<DownloadTarget, CommandError>;

    /// Makes the archive available locally and returns its path.
    fn download(
        &self,
        target: &DownloadTarget,
        workdir: &WorkDir,
    ) -> Result<PathBuf, CommandError>;
}

/// Runs the full pipeline in a working directory with a given tool runner.
pub struct Pipeline<'a> {
    workdir: &'a WorkDir,
    runner: &'a dyn ToolRunner,
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

impl<'a> Pipeline<'a> {
    /// A pipeline rooted at `workdir` that runs tools through `runner`.
    pub fn new(workdir: &'a WorkDir, runner: &'a dyn ToolRunner) -> Self {
        Self { workdir, runner }
    }

    /// resolve -> download -> extract -> initializer.
    ///
    /// Any error aborts the remaining steps. `Ok(false)` means everything was
    /// extracted but the initializer script did not succeed.
    pub fn do_everything(
        &self,
        operation: &dyn Operation,
        reference: &str,
        target_dir: Option<&str>,
        options: &ParsedOptions,
    ) -> Result<bool, CommandError> {
        let target = operation.resolve(reference, options)?;
        log::debug!("Resolved '{}' to {:?}", reference, target);

        let archive = operation.download(&target, self.workdir)?;
        let extracted = self.extract(&archive, target_dir)?;
        Ok(self.kick_initializer(&extracted))
    }

    /// Extracts `archive` and returns the directory it now lives in.
    ///
    /// The directory is `target_dir` if given and non-empty, else the archive's
    /// file name without its extension. Whatever already exists there is removed
    /// first, unless it is the working directory or one of its parents.
    ///
    /// - zip: unpacked into `<dir>.tmp`. A single top-level directory inside is
    ///   moved to `<dir>`; otherwise `<dir>.tmp` itself becomes `<dir>`.
    /// - tar family: unpacked into the working directory; the top-level
    ///   directory named after the archive is renamed to `<dir>` if they differ.
    pub fn extract(
        &self,
        archive: &Path,
        target_dir: Option<&str>,
    ) -> Result<PathBuf, CommandError> {
        let (kind, base) = ArchiveKind::detect(archive)?;
        let dir_name = target_dir.filter(|d| !d.is_empty()).unwrap_or(&base);
        let target = self.workdir.resolve(dir_name);
        if self.workdir.encloses_root(&target) {
            return Err(CommandError::UnsafeTarget(target));
        }
        log::debug!(
            "Extracting '{}' ({:?}) into '{}'",
            archive.display(),
            kind,
            target.display()
        );

        if self.workdir.exists(&target) {
            self.workdir.remove_recursive(&target)?;
        }

        match kind {
            ArchiveKind::Zip => self.extract_zip(archive, &target, dir_name)?,
            ArchiveKind::Tar => self.extract_tar(archive, &target, &base)?,
        }
        Ok(target)
    }

    fn extract_zip(
        &self,
        archive: &Path,
        target: &Path,
        dir_name: &str,
    ) -> Result<(), CommandError> {
        let scratch = self.workdir.resolve(format!("{}.tmp", dir_name));
        if self.workdir.exists(&scratch) {
            self.workdir.remove_recursive(&scratch)?;
        }

        let args = [
            OsString::from("-q"),
            OsString::from("-d"),
            scratch.clone().into_os_string(),
            archive.as_os_str().to_os_string(),
        ];
        self.run_tool(ArchiveKind::Zip, archive, &args)?;

        let entries = self.workdir.top_level_entries(&scratch)?;
        match entries.as_slice() {
            [only] if only.is_dir() => {
                self.workdir.rename(only, target)?;
                self.workdir.remove_recursive(&scratch)
            }
            _ => self.workdir.rename(&scratch, target),
        }
    }

    fn extract_tar(&self, archive: &Path, target: &Path, base: &str) -> Result<(), CommandError> {
        let args = [OsString::from("xf"), archive.as_os_str().to_os_string()];
        self.run_tool(ArchiveKind::Tar, archive, &args)?;

        let extracted = self.workdir.resolve(base);
        if extracted != target {
            self.workdir.rename(&extracted, target)?;
        }
        Ok(())
    }

    fn run_tool(
        &self,
        kind: ArchiveKind,
        archive: &Path,
        args: &[OsString],
    ) -> Result<(), CommandError> {
        let tool = kind.tool();
        executor::echo(&self.shown_command(tool, args));
        if self.runner.run(tool, args, self.workdir.root())? {
            Ok(())
        } else {
            Err(CommandError::ExtractionFailed {
                tool,
                archive: archive.to_path_buf(),
            })
        }
    }

    /// Runs the extracted boilerplate's initializer script, if it has one.
    pub fn kick_initializer(&self, dir: &Path) -> bool {
        initializer::kick_initializer(dir, self.workdir, self.runner)
    }

    fn shown_command(&self, program: &str, args: &[OsString]) -> String {
        let shown: Vec<OsString> = args
            .iter()
            .map(|a| OsString::from(self.workdir.shown(Path::new(a))))
            .collect();
        executor::render_command(program, &shown)
    }
}
