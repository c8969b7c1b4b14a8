// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The flat text table that fit data is persisted in.
//!
//! Each line is one (date, band) observation:
//!
//! ```text
//! date,band,freq,major,minor[,ra,ra_err,dec,dec_err,flux,flux_err,is_main]...
//! ```
//!
//! with the seven source fields repeated once per source, in order. Dates look
//! like `27Jun1999`, angles are sexagesimal with `:` separators and fluxes are
//! decimal mJy. Absent values are empty fields. There is no quoting, so no
//! field may contain a comma.

mod error;
mod read;
mod write;

pub use error::*;
pub use read::read_fit_table;
pub use write::write_fit_table;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};

use crate::types::FitTable;

/// The separator between fields.
pub(crate) const SEPARATOR: char = ',';

/// date, band, freq, major, minor
pub(crate) const NUM_FIXED_FIELDS: usize = 5;

/// ra, ra_err, dec, dec_err, flux, flux_err, is_main
pub(crate) const NUM_SOURCE_FIELDS: usize = 7;

impl FitTable {
    /// Read a fit table from a file.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FitTable, ReadTableError> {
        fn inner(path: &Path) -> Result<FitTable, ReadTableError> {
            debug!("Reading fit table {}", path.display());
            let table = read_fit_table(&mut BufReader::new(File::open(path)?))?;
            debug!(
                "{} has {} entries and {} sources",
                path.display(),
                table.len(),
                table.num_sources()
            );
            Ok(table)
        }
        inner(path.as_ref())
    }

    /// Write this table to a file, replacing whatever was there.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteTableError> {
        fn inner(table: &FitTable, path: &Path) -> Result<(), WriteTableError> {
            // Encode everything first so a bad table doesn't clobber the file.
            let mut bytes = vec![];
            write_fit_table(&mut bytes, table)?;
            std::fs::write(path, bytes)?;
            info!("Saved {} entries to {}", table.len(), path.display());
            Ok(())
        }
        inner(self, path.as_ref())
    }
}
