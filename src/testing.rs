// src/testing.rs

// Test doubles for the system collaborators.

use crate::system::{
    executor::{ExecutionError, ToolRunner},
    http::{HttpClient, HttpError},
};
use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: PathBuf,
}

/// Records every invocation. `unzip`/`tar` calls materialize `layout`
/// (entries ending in `/` are directories) where the real tool would.
#[derive(Debug)]
pub(crate) struct RecordingRunner {
    exit_ok: bool,
    failing_programs: Vec<String>,
    layout: Vec<String>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingRunner {
    pub(crate) fn succeeding() -> Self {
        Self::extracting(&[])
    }

    pub(crate) fn failing() -> Self {
        Self {
            exit_ok: false,
            ..Self::succeeding()
        }
    }

    pub(crate) fn extracting(layout: &[&str]) -> Self {
        Self {
            exit_ok: true,
            failing_programs: Vec::new(),
            layout: layout.iter().map(|s| s.to_string()).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Makes `program` exit non-zero while everything else succeeds.
    pub(crate) fn failing_on(mut self, program: &str) -> Self {
        self.failing_programs.push(program.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn materialize(&self, dest: &Path) {
        for entry in &self.layout {
            let path = dest.join(entry.trim_end_matches('/'));
            if entry.ends_with('/') {
                fs::create_dir_all(&path).unwrap();
            } else {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&path, entry.as_bytes()).unwrap();
            }
        }
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[OsString], cwd: &Path) -> Result<bool, ExecutionError> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let exit_ok = self.exit_ok && !self.failing_programs.iter().any(|p| p == program);
        if exit_ok {
            match program {
                // unzip -q -d <dest> <archive>
                "unzip" => self.materialize(&cwd.join(&args[2])),
                // tar xf <archive>
                "tar" => self.materialize(cwd),
                _ => {}
            }
        }
        self.calls.borrow_mut().push(Call {
            program: program.to_string(),
            args,
            cwd: cwd.to_path_buf(),
        });
        Ok(exit_ok)
    }
}

// Shared handles, so a test can inspect a double after handing it over.
impl ToolRunner for Rc<RecordingRunner> {
    fn run(&self, program: &str, args: &[OsString], cwd: &Path) -> Result<bool, ExecutionError> {
        self.as_ref().run(program, args, cwd)
    }
}

/// Serves canned responses by URL; anything else is a 404.
#[derive(Debug, Default)]
pub(crate) struct FakeHttp {
    responses: HashMap<String, Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl FakeHttp {
    pub(crate) fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl HttpClient for FakeHttp {
    fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let bytes = self.get_bytes(url)?;
        Ok(String::from_utf8(bytes).unwrap())
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.requested.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::NotFound(url.to_string()))
    }
}
