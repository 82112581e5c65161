// src/core/initializer.rs

use crate::{
    constants::INITIALIZER_SCRIPTS,
    system::{
        executor::{self, ToolRunner},
        fs_ops::WorkDir,
    },
};
use colored::Colorize;
use std::{ffi::OsString, path::Path};

/// Returns the first initializer script (and its interpreter) present in `dir`,
/// following the priority order of [`INITIALIZER_SCRIPTS`].
pub fn find_initializer(dir: &Path) -> Option<(&'static str, &'static str)> {
    INITIALIZER_SCRIPTS
        .iter()
        .copied()
        .find(|(script, _)| dir.join(script).is_file())
}

/// Runs the initializer script shipped in `dir`, if there is one.
///
/// The interpreter runs with `dir` as its working directory. Returns `true`
/// when no script exists or the script exited with status zero. A script that
/// fails, or an interpreter that cannot be launched, yields `false`.
pub fn kick_initializer(dir: &Path, workdir: &WorkDir, runner: &dyn ToolRunner) -> bool {
    executor::echo(&format!("cd {}", workdir.shown(dir)));

    let succeeded = match find_initializer(dir) {
        None => {
            log::debug!("No initializer script in '{}'", dir.display());
            true
        }
        Some((script, interpreter)) => {
            let args = [OsString::from(script)];
            executor::echo(&executor::render_command(interpreter, &args));
            match runner.run(interpreter, &args, dir) {
                Ok(true) => true,
                Ok(false) => {
                    eprintln!(
                        "{}",
                        format!(t!("initializer.warning.failed"), script = script).yellow()
                    );
                    false
                }
                Err(e) => {
                    log::warn!("Initializer '{}' could not be started: {}", script, e);
                    eprintln!("{}", e.to_string().yellow());
                    false
                }
            }
        }
    };

    executor::echo("cd -");
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_script_is_success() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::succeeding();
        assert!(kick_initializer(temp.path(), &WorkDir::new(temp.path()), &runner));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_first_script_by_priority_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("__init.sh"), "exit 0").unwrap();
        fs::write(temp.path().join("__init.py"), "pass").unwrap();

        let runner = RecordingRunner::succeeding();
        assert!(kick_initializer(temp.path(), &WorkDir::new(temp.path()), &runner));

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "python");
        assert_eq!(calls[0].args, vec!["__init.py".to_string()]);
        assert_eq!(calls[0].cwd, temp.path());
    }

    #[test]
    fn test_script_failure_is_reported_as_false() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("__init.rb"), "exit 1").unwrap();
        let runner = RecordingRunner::failing();
        assert!(!kick_initializer(temp.path(), &WorkDir::new(temp.path()), &runner));
        assert_eq!(runner.calls()[0].program, "ruby");
    }

    #[test]
    fn test_directory_named_like_a_script_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("__init.rb")).unwrap();
        fs::write(temp.path().join("__init.sh"), "exit 0").unwrap();
        assert_eq!(find_initializer(temp.path()), Some(("__init.sh", "bash")));
    }

    #[test]
    fn test_real_bash_exit_status_is_propagated() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("__init.sh"), "touch initialized\nexit 3\n").unwrap();
        let workdir = WorkDir::new(temp.path());
        let ok = kick_initializer(temp.path(), &workdir, &crate::system::executor::SystemRunner);
        assert!(!ok);
        assert!(temp.path().join("initialized").exists());
    }
}
