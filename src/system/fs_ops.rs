// src/system/fs_ops.rs

use crate::{error::CommandError, system::executor};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// The directory every relative path of an invocation is resolved against.
///
/// The binary uses the process's current directory; tests point it at a
/// temporary directory. All mutations go through here so each one is echoed
/// to the user as its shell equivalent.
#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    /// A `WorkDir` rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A `WorkDir` rooted at the process's current directory.
    pub fn current() -> io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` against the root. Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// How `path` is shown to the user: relative to the root when it lives below it.
    pub fn shown(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// True if anything (file, directory or dangling symlink) exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// True if `path` is the root itself or one of its ancestors, so removing
    /// it would take the working directory with it.
    pub fn encloses_root(&self, path: &Path) -> bool {
        let canonical = |p: &Path| dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
        self.root.starts_with(path) || canonical(&self.root).starts_with(canonical(path))
    }

    /// `rm -rf path`.
    pub fn remove_recursive(&self, path: &Path) -> Result<(), CommandError> {
        executor::echo(&format!("rm -rf {}", self.quoted(path)));
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CommandError::filesystem("inspect", path, e)),
        };
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| CommandError::filesystem("remove", path, e))
    }

    /// `mv from to`.
    pub fn rename(&self, from: &Path, to: &Path) -> Result<(), CommandError> {
        executor::echo(&format!("mv {} {}", self.quoted(from), self.quoted(to)));
        fs::rename(from, to).map_err(|e| CommandError::filesystem("move", from, e))
    }

    /// The immediate children of `dir`, hidden entries included, sorted by name.
    pub fn top_level_entries(&self, dir: &Path) -> Result<Vec<PathBuf>, CommandError> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry.map(walkdir::DirEntry::into_path).map_err(|e| {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory loop detected"));
                    CommandError::filesystem("list", dir, source)
                })
            })
            .collect()
    }

    /// Writes `content` to `path`, replacing any existing file.
    pub fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), CommandError> {
        fs::write(path, content).map_err(|e| CommandError::filesystem("write", path, e))
    }

    fn quoted(&self, path: &Path) -> String {
        let shown = self.shown(path);
        shlex::try_quote(&shown)
            .map(|q| q.into_owned())
            .unwrap_or(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_shown_is_relative_to_root() {
        let workdir = WorkDir::new("/work/space");
        assert_eq!(workdir.shown(Path::new("/work/space/app")), "app");
        assert_eq!(workdir.shown(Path::new("/elsewhere/app")), "/elsewhere/app");
    }

    #[test]
    fn test_remove_recursive_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::new(temp.path());

        let dir = workdir.resolve("old");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/file.txt"), "x").unwrap();
        workdir.remove_recursive(&dir).unwrap();
        assert!(!workdir.exists(&dir));

        let file = workdir.resolve("plain.txt");
        fs::write(&file, "x").unwrap();
        workdir.remove_recursive(&file).unwrap();
        assert!(!workdir.exists(&file));
    }

    #[test]
    fn test_remove_recursive_missing_path_is_ok() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::new(temp.path());
        assert!(workdir.remove_recursive(&workdir.resolve("nothing")).is_ok());
    }

    #[test]
    fn test_top_level_entries_includes_hidden_and_skips_nested() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::new(temp.path());
        fs::create_dir_all(temp.path().join("b/deep")).unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join(".hidden"), "").unwrap();

        let names: Vec<String> = workdir
            .top_level_entries(temp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".hidden", "a.txt", "b"]);
    }

    #[test]
    fn test_encloses_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");
        fs::create_dir_all(root.join("sub")).unwrap();
        let workdir = WorkDir::new(&root);

        assert!(workdir.encloses_root(&root));
        assert!(workdir.encloses_root(&workdir.resolve("")));
        assert!(workdir.encloses_root(&workdir.resolve(".")));
        assert!(workdir.encloses_root(&workdir.resolve("..")));
        assert!(workdir.encloses_root(temp.path()));
        assert!(!workdir.encloses_root(&workdir.resolve("sub")));
        assert!(!workdir.encloses_root(&workdir.resolve("not-yet")));
    }

    #[test]
    fn test_rename_missing_source_reports_path() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::new(temp.path());
        let err = workdir
            .rename(&workdir.resolve("ghost"), &workdir.resolve("target"))
            .unwrap_err();
        assert!(matches!(err, CommandError::Filesystem { action: "move", .. }));
    }
}
