// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Read a directory of fit reports into a fit table, keeping the main-source
//! labels of the table that was there before.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, TableArgs, Warn, ARG_FILE_HELP};
use crate::{
    merge::{merge_fit_tables, MergeSummary},
    report::{read_report_dir, ReadPolicy, ReportDirContents},
    types::FitTable,
    FitsUtilsError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ExtractArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The directory containing the fit reports. Only the files directly
    /// inside it are read; each filename must carry the date and band of the
    /// observation (e.g. XTEJ1748_27Jun1999_Lband.txt).
    #[clap(short = 'd', long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) reports_dir: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) table_args: TableArgs,

    /// Ignore report files that can't be read, rather than stopping at the
    /// first one.
    #[clap(long, help_heading = "INPUT FILES")]
    #[serde(default)]
    pub(super) skip_bad_files: bool,

    /// Overwrite the fit table without carrying its main-source labels over.
    #[clap(long, help_heading = "TABLE")]
    #[serde(default)]
    pub(super) no_merge: bool,
}

/// Extraction parameters, after the arguments have been checked.
#[derive(Debug)]
struct ExtractParams {
    reports_dir: PathBuf,
    table: PathBuf,
    policy: ReadPolicy,
    merge: bool,
}

impl ExtractArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct, preferring CLI arguments over those in the file.
    pub(super) fn merge(self) -> Result<ExtractArgs, FitsUtilsError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let ExtractArgs {
                args_file: _,
                reports_dir,
                table_args,
                skip_bad_files,
                no_merge,
            } = unpack_arg_file!(arg_file);

            Ok(ExtractArgs {
                args_file: None,
                reports_dir: cli_args.reports_dir.or(reports_dir),
                table_args: cli_args.table_args.merge(table_args),
                skip_bad_files: cli_args.skip_bad_files || skip_bad_files,
                no_merge: cli_args.no_merge || no_merge,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<ExtractParams, ExtractArgsError> {
        let ExtractArgs {
            args_file: _,
            reports_dir,
            table_args: TableArgs { table },
            skip_bad_files,
            no_merge,
        } = self;

        let params = ExtractParams {
            reports_dir: reports_dir.ok_or(ExtractArgsError::NoReportsDir)?,
            table: table.ok_or(ExtractArgsError::NoTable)?,
            policy: if skip_bad_files {
                ReadPolicy::Skip
            } else {
                ReadPolicy::Abort
            },
            merge: !no_merge,
        };

        let mut printer = InfoPrinter::new("Extracting fit reports".into());
        printer.push_line(format!("Reports: {}", params.reports_dir.display()).into());
        printer.push_block(vec![
            format!("Table: {}", params.table.display()).into(),
            if !params.merge {
                "Not keeping main-source labels".into()
            } else if params.table.exists() {
                "Main-source labels will be carried over".into()
            } else {
                "Table doesn't exist yet; it will be created".into()
            },
        ]);
        if params.policy == ReadPolicy::Skip {
            printer.push_line("Unreadable reports will be skipped".into());
        }
        printer.display();

        Ok(params)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FitsUtilsError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let ExtractParams {
            reports_dir,
            table: table_path,
            policy,
            merge,
        } = self.parse()?;

        let ReportDirContents {
            table: mut new,
            failures,
        } = read_report_dir(&reports_dir, policy)?;
        display_warnings();
        info!(
            "Read {} sources in {} observations",
            new.num_sources(),
            new.len()
        );
        if !failures.is_empty() {
            info!("{} report files couldn't be read", failures.len());
        }

        if merge && table_path.exists() {
            let old = FitTable::read_file(&table_path)?;
            let MergeSummary {
                carried,
                ambiguous,
                unmatched,
            } = merge_fit_tables(&mut new, &old);
            info!("Carried {carried} main-source labels over from the old table");
            debug!("{unmatched} sources have no counterpart in the old table");
            if ambiguous > 0 {
                format!("{ambiguous} sources match more than one old source; their labels weren't carried over").warn();
            }
        }
        display_warnings();

        if dry_run {
            info!("Dry run -- not writing {}", table_path.display());
            return Ok(());
        }

        new.write_file(&table_path)?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum ExtractArgsError {
    #[error("No directory of fit reports was specified")]
    NoReportsDir,

    #[error("No fit table was specified")]
    NoTable,
}
