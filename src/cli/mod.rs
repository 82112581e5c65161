// src/cli/mod.rs

use crate::{
    constants::{COMMAND_OPTIONS, RELEASE},
    core::{
        operation::Pipeline,
        option_parser::{DefinitionError, OptionParser},
        schema,
    },
    error::CommandError,
    system::{
        executor::{SystemRunner, ToolRunner},
        fs_ops::WorkDir,
        http::{HttpClient, UreqClient},
    },
};
use std::rc::Rc;

/// The command-line front end: parses options, handles `--help`/`--version`,
/// validates the positional arguments and drives the pipeline.
pub struct App {
    script_name: String,
    workdir: WorkDir,
    runner: Box<dyn ToolRunner>,
    http: Rc<dyn HttpClient>,
    parser: OptionParser,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("script_name", &self.script_name)
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the app. Fails only if the built-in option table is malformed.
    pub fn new(script_name: impl Into<String>, workdir: WorkDir) -> Result<Self, DefinitionError> {
        Ok(Self {
            script_name: script_name.into(),
            workdir,
            runner: Box::new(SystemRunner),
            http: Rc::new(UreqClient::default()),
            parser: OptionParser::new(COMMAND_OPTIONS)?,
        })
    }

    /// Replaces the runner used for archive tools and initializer scripts.
    pub fn with_runner(mut self, runner: Box<dyn ToolRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replaces the HTTP client used to reach GitHub.
    pub fn with_http_client(mut self, http: Rc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    /// Runs one invocation and returns the process exit status.
    ///
    /// `Ok(1)` means the boilerplate was expanded but its initializer failed;
    /// every other failure is an `Err`.
    pub fn run(&self, args: Vec<String>) -> Result<i32, CommandError> {
        let mut args = args;
        let options = self.parser.parse(&mut args)?;

        if options.is_set("help") {
            print!("{}", self.help_message());
            return Ok(0);
        }
        if options.is_set("version") {
            println!("{}", RELEASE);
            return Ok(0);
        }

        let mut positional = args.into_iter();
        let reference = positional.next().ok_or_else(|| CommandError::MissingReference {
            script: self.script_name.clone(),
        })?;
        let target_dir = positional
            .next()
            .ok_or_else(|| CommandError::MissingTargetDirectory {
                script: self.script_name.clone(),
            })?;
        let ignored: Vec<String> = positional.collect();
        if !ignored.is_empty() {
            log::warn!("Ignoring extra arguments: {:?}", ignored);
        }

        let operation = schema::create(&reference, Rc::clone(&self.http))?;
        let pipeline = Pipeline::new(&self.workdir, self.runner.as_ref());
        let succeeded = pipeline.do_everything(
            operation.as_ref(),
            &reference,
            Some(target_dir.as_str()),
            &options,
        )?;

        Ok(if succeeded { 0 } else { 1 })
    }

    /// The text printed by `--help`.
    pub fn help_message(&self) -> String {
        let mut buf = format!(t!("cli.help.usage"), script = self.script_name);
        for definition in COMMAND_OPTIONS {
            buf.push_str(&format!("  {}\n", definition));
        }
        buf.push_str(&format!(t!("cli.help.examples"), script = self.script_name));
        buf
    }
}
