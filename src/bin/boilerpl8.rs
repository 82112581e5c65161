// src/bin/boilerpl8.rs

use anyhow::{Context, Result};
use boilerpl8::{cli::App, system::fs_ops::WorkDir};
use colored::Colorize;
use std::{env, path::Path};

/// The main entry point of `boilerpl8`.
/// It sets up logging, runs the app, and performs centralized error handling.
fn main() {
    env_logger::init();

    match run_cli() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            // Every failure, user error or not, ends up here: one line on stderr, exit 1.
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run_cli() -> Result<i32> {
    let mut argv = env::args();
    let script_name = argv
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let args: Vec<String> = argv.collect();
    log::debug!("{} invoked with {:?}", script_name, args);

    let workdir = WorkDir::current().context("Could not determine the current directory")?;
    let app = App::new(script_name, workdir).context("Built-in option table is invalid")?;
    Ok(app.run(args)?)
}
