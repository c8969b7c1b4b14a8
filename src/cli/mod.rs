// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `fitsutils`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `FitsUtils`,
//! `FitsUtils::run`, and `FitsUtilsError`.

#[macro_use]
mod common;
mod error;
mod extract;
mod label;
mod series;
mod status;

pub(crate) use common::Warn;
pub use error::FitsUtilsError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Extract, persist and reconcile the source fits of radio interferometric images.
Fit reports are read into a table, main sources are labelled, and time series
are made of the labelled table."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct FitsUtils {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information. Nothing is written.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "fit-folder")]
    #[clap(about = "Read a directory of fit reports into a fit table, keeping the main-source labels already in the table.")]
    Extract(extract::ExtractArgs),

    #[clap(alias = "getmain")]
    #[clap(about = "Label the main source of observations in a fit table.")]
    Label(label::LabelArgs),

    #[clap(alias = "verify")]
    #[clap(about = "Verify that a fit table can be read, and summarise it.")]
    Status(status::StatusArgs),

    #[clap(about = "Write the time series of a band (source separations or flux densities) as CSV.")]
    Series(series::SeriesArgs),
}

impl FitsUtils {
    pub fn run(self) -> Result<(), FitsUtilsError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        // Print the version of fitsutils and its build-time information.
        let sub_command = match &self.command {
            Command::Extract(_) => "extract",
            Command::Label(_) => "label",
            Command::Status(_) => "status",
            Command::Series(_) => "series",
        };
        info!("fitsutils {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    let toml_str = toml::to_string(&args).map_err(|e| {
                        FitsUtilsError::ArgFile(format!("Couldn't serialise the arguments: {e}"))
                    })?;
                    std::fs::write(toml, toml_str)?;
                }
                args.run(dry_run)?;
            }};
        }

        match self.command {
            Command::Extract(args) => merge_save_run!(args),
            Command::Label(args) => merge_save_run!(args),
            Command::Series(args) => merge_save_run!(args),
            Command::Status(args) => args.run()?,
        }
        common::display_warnings();

        info!("fitsutils {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
