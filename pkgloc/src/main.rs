//! # pkgloc
//!
//! A CLI tool for aggregating source-line and patch-diff statistics across
//! a directory of software packages.
//!
//! ## Overview
//!
//! pkgloc is built on top of pkgloclib. Point it at a directory of source
//! RPMs (or extracted package directories) and it reports, per package and
//! in total, how many source lines the embedded tarballs carry and how
//! many lines the embedded patches add.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! pkgloc
//!
//! # Scan a package mirror with 8 workers and a language breakdown
//! pkgloc --dir /srv/mirror/src --proc 8 --lang
//!
//! # Scan a single package
//! pkgloc --dir /srv/mirror/src --file hello-1.0.src.rpm
//!
//! # Verbose diagnostics for skipped members and parse failures
//! pkgloc -D --dir /srv/mirror/src
//!
//! # Machine-readable output
//! pkgloc --dir /srv/mirror/src --output json
//! ```
//!
//! The scan is best-effort by design: corrupt packages, patches, and
//! archives degrade to zero counts and the process always exits 0. Only
//! `--debug` surfaces individual failures.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use pkgloclib::{run, RunOptions};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("pkgloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Source-line and patch-diff statistics for directories of source packages")
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable verbose diagnostic output"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("PATH")
                .help("Directory with packages (defaults to the current directory)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("NAME")
                .help("Process exactly one named package"),
        )
        .arg(
            Arg::new("lang")
                .short('l')
                .long("lang")
                .action(ArgAction::SetTrue)
                .help("Enable detailed language usage output"),
        )
        .arg(
            Arg::new("proc")
                .short('p')
                .long("proc")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("1")
                .help("Number of parallel workers (1 = sequential)"),
        )
        .arg(
            Arg::new("flag")
                .short('g')
                .long("flag")
                .value_name("FLAG")
                .help("Process only packages with the given flag (accepted, not wired up)"),
        )
        .arg(
            Arg::new("print-flags")
                .long("print-flags")
                .action(ArgAction::SetTrue)
                .help("Print package flags (accepted, not wired up)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve the working directory, joining relative paths onto the current
/// directory.
fn resolve_dir(dir: Option<&String>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(match dir {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            }
        }
        None => cwd,
    })
}

fn execute(matches: &ArgMatches) -> anyhow::Result<String> {
    let dir = resolve_dir(matches.get_one::<String>("dir"))?;

    let mut options = RunOptions::new(dir)
        .lang(matches.get_flag("lang"))
        .workers(matches.get_one::<usize>("proc").copied().unwrap_or(1))
        .flag(matches.get_one::<String>("flag").cloned())
        .print_flags(matches.get_flag("print-flags"));
    if let Some(name) = matches.get_one::<String>("file") {
        options = options.file(name.clone());
    }

    let result = run(&options)?;

    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => {
            let mut json = render::render_json(&result)?;
            json.push('\n');
            Ok(json)
        }
        _ => Ok(render::render_text(&result, options.lang)),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"));

    match execute(&matches) {
        Ok(output) => print!("{}", output),
        Err(err) => error!("{:#}", err),
    }

    // Errors are reported through logging; a best-effort statistics scan
    // never signals failure through its exit status.
    ExitCode::SUCCESS
}
