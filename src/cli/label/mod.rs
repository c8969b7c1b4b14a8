// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Label the main source of observations in a fit table, either one
//! observation at a time from the command line, or interactively.


use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{parse_cli_date, InfoPrinter, TableArgs, ARG_FILE_HELP};
use crate::{
    label::{prompt_for_main_source, Answer},
    report::DATE_FORMAT,
    types::FitTable,
    FitsUtilsError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct LabelArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) table_args: TableArgs,

    /// The date of the observation to label, e.g. 27Jun1999 or 1999-06-27.
    /// Requires --band and --index. Without these, the user is asked about
    /// each observation in turn.
    #[clap(long, help_heading = "ONE OBSERVATION")]
    pub(super) date: Option<String>,

    /// The band of the observation to label, e.g. Lband.
    #[clap(long, help_heading = "ONE OBSERVATION")]
    pub(super) band: Option<String>,

    /// The index of the main source in the observation (the first source is
    /// 0).
    #[clap(short, long, help_heading = "ONE OBSERVATION")]
    pub(super) index: Option<usize>,

    /// When asking, also ask about observations that already have a main
    /// source.
    #[clap(long, help_heading = "INTERACTIVE")]
    #[serde(default)]
    pub(super) force: bool,
}

/// How the table gets labelled.
#[derive(Debug, PartialEq, Eq)]
enum LabelMode {
    Direct {
        date: NaiveDate,
        band: String,
        index: usize,
    },
    Interactive {
        force: bool,
    },
}

impl LabelArgs {
    pub(super) fn merge(self) -> Result<LabelArgs, FitsUtilsError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let LabelArgs {
                args_file: _,
                table_args,
                date,
                band,
                index,
                force,
            } = unpack_arg_file!(arg_file);

            Ok(LabelArgs {
                args_file: None,
                table_args: cli_args.table_args.merge(table_args),
                date: cli_args.date.or(date),
                band: cli_args.band.or(band),
                index: cli_args.index.or(index),
                force: cli_args.force || force,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(PathBuf, LabelMode), LabelArgsError> {
        let LabelArgs {
            args_file: _,
            table_args: TableArgs { table },
            date,
            band,
            index,
            force,
        } = self;

        let table = table.ok_or(LabelArgsError::NoTable)?;
        let mode = match (date, band, index) {
            (None, None, None) => LabelMode::Interactive { force },
            (Some(date), Some(band), Some(index)) => LabelMode::Direct {
                date: parse_cli_date(&date).ok_or(LabelArgsError::BadDate(date))?,
                band,
                index,
            },
            _ => return Err(LabelArgsError::IncompleteKey),
        };
        Ok((table, mode))
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FitsUtilsError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let (table_path, mode) = self.parse()?;
        let mut table = FitTable::read_file(&table_path)?;

        match mode {
            LabelMode::Direct { date, band, index } => {
                let entry = table
                    .get_mut(date, &band)
                    .ok_or_else(|| LabelArgsError::NoSuchEntry {
                        date: date.format(DATE_FORMAT).to_string(),
                        band: band.clone(),
                    })?;
                entry.set_main_source(index)?;
                info!(
                    "Source {index} is now the main source of {} {band}",
                    date.format(DATE_FORMAT)
                );
                save(&table, &table_path, dry_run)?;
            }

            LabelMode::Interactive { force } => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                label_interactively(
                    &mut table,
                    &table_path,
                    force,
                    dry_run,
                    &mut stdin.lock(),
                    &mut stdout.lock(),
                )?;
            }
        }

        Ok(())
    }
}

/// Ask about every observation that needs labelling (or every observation,
/// if `force`), saving the table after each answer. Returns the number of
/// observations labelled.
fn label_interactively<R: BufRead, W: Write>(
    table: &mut FitTable,
    table_path: &Path,
    force: bool,
    dry_run: bool,
    input: &mut R,
    output: &mut W,
) -> Result<usize, FitsUtilsError> {
    let to_ask: Vec<(NaiveDate, String)> = table
        .iter()
        .filter(|(_, _, entry)| !entry.sources.is_empty() && (force || entry.needs_labelling()))
        .map(|(date, band, _)| (date, band.to_string()))
        .collect();
    if to_ask.is_empty() {
        info!("Every observation has a main source; use --force to relabel them");
        return Ok(0);
    }

    let mut num_labelled = 0;
    for (i, (date, band)) in to_ask.iter().enumerate() {
        debug!("Observation {} of {}", i + 1, to_ask.len());
        let entry = match table.get_mut(*date, band) {
            Some(e) => e,
            None => continue,
        };
        match prompt_for_main_source(*date, band, entry, input, output)? {
            Answer::Index(index) => {
                entry.set_main_source(index)?;
                num_labelled += 1;
                save(table, table_path, dry_run)?;
            }
            Answer::Skip => (),
            Answer::Quit => break,
        }
    }

    let mut printer = InfoPrinter::new("Labelling finished".into());
    printer.push_line(format!("Labelled {num_labelled} of {} observations", to_ask.len()).into());
    let remaining = table.iter().filter(|(_, _, e)| e.needs_labelling()).count();
    printer.push_line(format!("{remaining} observations still need a main source").into());
    printer.display();

    Ok(num_labelled)
}

fn save(table: &FitTable, table_path: &Path, dry_run: bool) -> Result<(), FitsUtilsError> {
    if dry_run {
        debug!("Dry run -- not writing {}", table_path.display());
    } else {
        table.write_file(table_path)?;
    }
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub(super) enum LabelArgsError {
    #[error("No fit table was specified")]
    NoTable,

    #[error("--date, --band and --index must be given together, or not at all")]
    IncompleteKey,

    #[error("Couldn't read '{0}' as a date; use e.g. 27Jun1999 or 1999-06-27")]
    BadDate(String),

    #[error("The table has no observation for {date} {band}")]
    NoSuchEntry { date: String, band: String },
}
