// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write the time series of one band as comma-separated text, ready for
//! plotting elsewhere.


use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, TableArgs, ARG_FILE_HELP};
use crate::{
    series::{
        band_series, write_series_csv, Quantity, ReferenceMode, SeriesParams,
        QUANTITIES_COMMA_SEPARATED, REFERENCE_MODES_COMMA_SEPARATED,
    },
    types::FitTable,
    FitsUtilsError,
};

lazy_static::lazy_static! {
    static ref QUANTITY_HELP: String =
        format!("What to measure for each observation. Separations are in arcsec and flux densities in mJy. Supported: {}. Default: {}",
                *QUANTITIES_COMMA_SEPARATED, Quantity::default());

    static ref REFERENCE_HELP: String =
        format!("Which source of each observation the others are measured against. 'leftmost' is the source with the largest RA. Supported: {}. Default: {}",
                *REFERENCE_MODES_COMMA_SEPARATED, ReferenceMode::default());
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SeriesArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) table_args: TableArgs,

    /// The band to use, e.g. Lband.
    #[clap(short, long)]
    pub(super) band: Option<String>,

    #[clap(short, long, help = QUANTITY_HELP.as_str())]
    pub(super) quantity: Option<String>,

    #[clap(short, long, help = REFERENCE_HELP.as_str())]
    pub(super) reference: Option<String>,

    /// Add a tenth of the clean-beam size (the geometric mean of its axes) in
    /// quadrature to the errors of separations.
    #[clap(long)]
    #[serde(default)]
    pub(super) beam_error: bool,

    /// The file to write the series to. If not given, the series is printed
    /// after the log messages.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl SeriesArgs {
    pub(super) fn merge(self) -> Result<SeriesArgs, FitsUtilsError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let SeriesArgs {
                args_file: _,
                table_args,
                band,
                quantity,
                reference,
                beam_error,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(SeriesArgs {
                args_file: None,
                table_args: cli_args.table_args.merge(table_args),
                band: cli_args.band.or(band),
                quantity: cli_args.quantity.or(quantity),
                reference: cli_args.reference.or(reference),
                beam_error: cli_args.beam_error || beam_error,
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(PathBuf, String, SeriesParams, Option<PathBuf>), SeriesArgsError> {
        let SeriesArgs {
            args_file: _,
            table_args: TableArgs { table },
            band,
            quantity,
            reference,
            beam_error,
            output,
        } = self;

        let table = table.ok_or(SeriesArgsError::NoTable)?;
        let band = band.ok_or(SeriesArgsError::NoBand)?;
        let quantity = match quantity {
            None => Quantity::default(),
            Some(q) => Quantity::from_str(&q.to_lowercase())
                .map_err(|_| SeriesArgsError::BadQuantity(q))?,
        };
        let reference = match reference {
            None => ReferenceMode::default(),
            Some(r) => ReferenceMode::from_str(&r.to_lowercase())
                .map_err(|_| SeriesArgsError::BadReference(r))?,
        };
        let params = SeriesParams {
            quantity,
            reference,
            beam_error,
        };

        let mut printer = InfoPrinter::new(format!("{band} {quantity} series").into());
        printer.push_line(format!("Reference source: {reference}").into());
        if beam_error {
            printer.push_line("Including the clean-beam size in separation errors".into());
        }
        if let Some(output) = output.as_ref() {
            printer.push_line(format!("Writing to {}", output.display()).into());
        }
        printer.display();

        Ok((table, band, params, output))
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FitsUtilsError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let (table_path, band, params, output) = self.parse()?;

        let table = FitTable::read_file(table_path)?;
        let points = band_series(&table, &band, &params)?;
        display_warnings();
        info!("{} points in the series", points.len());

        if dry_run {
            info!("Dry run -- not writing the series");
            return Ok(());
        }

        match output {
            Some(path) => {
                let mut f = BufWriter::new(File::create(&path)?);
                write_series_csv(&mut f, &points)?;
                f.flush()?;
                info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                write_series_csv(&mut stdout.lock(), &points)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum SeriesArgsError {
    #[error("No fit table was specified")]
    NoTable,

    #[error("No band was specified")]
    NoBand,

    #[error("'{0}' isn't a quantity; supported quantities are: {}", *QUANTITIES_COMMA_SEPARATED)]
    BadQuantity(String),

    #[error("'{0}' isn't a way to pick a reference source; supported are: {}", *REFERENCE_MODES_COMMA_SEPARATED)]
    BadReference(String),
}
