// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing fit tables.

use std::fmt::Display;

use super::{WriteTableError, SEPARATOR};
use crate::{
    report::DATE_FORMAT,
    types::{FitTable, SourceRecord},
};

/// Write `table` as one line per (date, band) entry, ordered by date and then
/// band.
pub fn write_fit_table<T: std::io::Write>(
    buf: &mut T,
    table: &FitTable,
) -> Result<(), WriteTableError> {
    for (date, band, entry) in table.iter() {
        let date = date.format(DATE_FORMAT).to_string();
        let check = |field: &'static str, value: &str| -> Result<(), WriteTableError> {
            if value.contains(SEPARATOR) {
                Err(WriteTableError::CommaInField {
                    date: date.clone(),
                    band: band.to_string(),
                    field,
                    value: value.to_string(),
                })
            } else {
                Ok(())
            }
        };
        check("band", band)?;
        let freq = entry.data.freq.as_deref().unwrap_or_default();
        let major = entry.data.major.as_deref().unwrap_or_default();
        let minor = entry.data.minor.as_deref().unwrap_or_default();
        check("frequency", freq)?;
        check("beam major axis", major)?;
        check("beam minor axis", minor)?;

        let mut fields: Vec<String> = vec![
            date.clone(),
            band.to_string(),
            freq.to_string(),
            major.to_string(),
            minor.to_string(),
        ];
        for source in &entry.sources {
            fields.extend(source_fields(source));
        }
        writeln!(buf, "{}", fields.join(&SEPARATOR.to_string()))?;
    }

    Ok(())
}

fn source_fields(source: &SourceRecord) -> [String; 7] {
    [
        opt(&source.ra),
        opt(&source.ra_err),
        opt(&source.dec),
        opt(&source.dec_err),
        opt(&source.flux.map(|f| f.normalize())),
        opt(&source.flux_err.map(|f| f.normalize())),
        source.is_main.to_string(),
    ]
}

/// Absent values are empty fields.
fn opt<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
