// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Time series of one band across all observation dates.

For every (date, band) entry, a reference source is picked (the labelled main
source, or the source furthest east or west), and one of these quantities is
measured:

- the angular separation of every other source from the reference. It is
  negative when the other source has a larger RA than the reference;
- the angular separation of the brightest other source from the reference. An
  entry without other sources gives a point at zero;
- the flux density of the reference.

Separations are in arcseconds and flux densities in mJy.
 */

mod error;
mod separation;
#[cfg(test)]
mod tests;

pub use error::SeriesError;
pub use separation::{angular_separation, SkyPosition};

use chrono::{Datelike, NaiveDate};
use hifitime::Epoch;
use itertools::Itertools;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    cli::Warn,
    report::DATE_FORMAT,
    types::{FitTable, ObservationEntry, SourceRecord},
};

/// The fraction of the clean-beam size used as a separation error.
const BEAM_ERROR_FRACTION: f64 = 0.1;

lazy_static::lazy_static! {
    pub(crate) static ref REFERENCE_MODES_COMMA_SEPARATED: String = {
        use strum::IntoEnumIterator;
        ReferenceMode::iter().join(", ")
    };

    pub(crate) static ref QUANTITIES_COMMA_SEPARATED: String = {
        use strum::IntoEnumIterator;
        Quantity::iter().join(", ")
    };
}

/// How the reference source of an entry is picked.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum ReferenceMode {
    /// The source labelled as main.
    #[default]
    #[strum(serialize = "main")]
    Main,

    /// The source with the largest RA.
    #[strum(serialize = "leftmost")]
    Leftmost,

    /// The source with the smallest RA.
    #[strum(serialize = "rightmost")]
    Rightmost,
}

/// What is measured for each entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Quantity {
    #[default]
    #[strum(serialize = "angsep")]
    AngSep,

    #[strum(serialize = "angsep-brightest")]
    AngSepBrightest,

    #[strum(serialize = "flux")]
    Flux,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesParams {
    pub quantity: Quantity,
    pub reference: ReferenceMode,

    /// Add a tenth of the clean-beam size (the geometric mean of its axes) in
    /// quadrature to separation errors.
    pub beam_error: bool,
}

/// One measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub mjd: f64,
    pub value: f64,
    pub err: f64,
}

/// Write points as comma-separated text with a header line.
pub fn write_series_csv<T: std::io::Write>(
    buf: &mut T,
    points: &[SeriesPoint],
) -> Result<(), SeriesError> {
    writeln!(buf, "date,mjd,value,err")?;
    for p in points {
        writeln!(
            buf,
            "{},{},{},{}",
            p.date.format(DATE_FORMAT),
            p.mjd,
            p.value,
            p.err
        )?;
    }
    Ok(())
}

/// The Modified Julian Date (UTC) of the start of `date`.
pub fn mjd(date: NaiveDate) -> f64 {
    // chrono months and days always fit in a u8. Midnights are whole MJDs.
    Epoch::from_gregorian_utc_at_midnight(date.year(), date.month() as u8, date.day() as u8)
        .to_mjd_utc_days()
        .round()
}

/// Measure `params.quantity` for every entry of `band`, ordered by date.
/// Entries that can't be measured (e.g. they have no main source) are skipped
/// with a warning.
pub fn band_series(
    table: &FitTable,
    band: &str,
    params: &SeriesParams,
) -> Result<Vec<SeriesPoint>, SeriesError> {
    let mut points = vec![];
    let mut num_entries = 0;
    for (date, entry) in table.band(band) {
        num_entries += 1;
        match entry_points(date, entry, params) {
            Ok(p) => points.extend(p),
            Err(e) => format!(
                "{} {band}: Not using this observation: {e}",
                date.format(DATE_FORMAT)
            )
            .warn(),
        }
    }
    if num_entries == 0 {
        return Err(SeriesError::NoSuchBand {
            band: band.to_string(),
            available: table.bands().join(", "),
        });
    }
    debug!(
        "{} points from {num_entries} {band} observations",
        points.len()
    );

    Ok(points)
}

/// Pick the reference source of an entry, returning it with its index.
pub fn reference_source(
    entry: &ObservationEntry,
    mode: ReferenceMode,
) -> Result<(usize, &SourceRecord), SeriesError> {
    let with_ra = entry
        .sources
        .iter()
        .enumerate()
        .filter(|(_, s)| s.ra.is_some());
    // The first source wins ties.
    let reference = match mode {
        ReferenceMode::Main => return Ok(entry.main_source()?),
        ReferenceMode::Leftmost => {
            with_ra.reduce(|best, s| if s.1.ra > best.1.ra { s } else { best })
        }
        ReferenceMode::Rightmost => {
            with_ra.reduce(|best, s| if s.1.ra < best.1.ra { s } else { best })
        }
    };
    reference.ok_or(SeriesError::MissingField("RA"))
}

fn entry_points(
    date: NaiveDate,
    entry: &ObservationEntry,
    params: &SeriesParams,
) -> Result<Vec<SeriesPoint>, SeriesError> {
    let (i_ref, reference) = reference_source(entry, params.reference)?;
    let point = |value: f64, err: f64| SeriesPoint {
        date,
        mjd: mjd(date),
        value,
        err,
    };
    let others = entry
        .sources
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != i_ref);

    let mut points = vec![];
    match params.quantity {
        Quantity::Flux => {
            let flux = reference.flux.ok_or(SeriesError::MissingField("flux"))?;
            let flux_err = reference
                .flux_err
                .ok_or(SeriesError::MissingField("flux error"))?;
            points.push(point(
                flux.to_f64().unwrap_or(f64::NAN),
                flux_err.to_f64().unwrap_or(f64::NAN),
            ));
        }

        Quantity::AngSep => {
            let (ref_pos, beam_err) = reference_position(entry, reference, params.beam_error)?;
            for (i, source) in others {
                let pos = match SkyPosition::from_source(source) {
                    Ok(p) => p,
                    Err(e) => {
                        format!(
                            "{} source {i}: Not using this source: {e}",
                            date.format(DATE_FORMAT)
                        )
                        .warn();
                        continue;
                    }
                };
                let (sep, sep_err) = angular_separation(&ref_pos, &pos);
                let sign = if source.ra > reference.ra { -1.0 } else { 1.0 };
                points.push(point(sign * sep, sep_err.hypot(beam_err)));
            }
        }

        Quantity::AngSepBrightest => {
            let (ref_pos, beam_err) = reference_position(entry, reference, params.beam_error)?;
            // The first source wins ties.
            let brightest =
                others.reduce(|best, s| if s.1.flux > best.1.flux { s } else { best });
            match brightest {
                Some((_, source)) => {
                    let pos = SkyPosition::from_source(source)?;
                    let (sep, sep_err) = angular_separation(&ref_pos, &pos);
                    points.push(point(sep, sep_err.hypot(beam_err)));
                }
                None => points.push(point(0.0, 0.0)),
            }
        }
    }

    Ok(points)
}

/// The position of the reference source, and the beam error to use with it
/// (zero unless `use_beam_error`).
fn reference_position(
    entry: &ObservationEntry,
    reference: &SourceRecord,
    use_beam_error: bool,
) -> Result<(SkyPosition, f64), SeriesError> {
    let pos = SkyPosition::from_source(reference)?;
    let beam_err = if use_beam_error {
        beam_error(entry)?
    } else {
        0.0
    };
    Ok((pos, beam_err))
}

/// A tenth of the geometric mean of the clean-beam axes \[arcsec\].
fn beam_error(entry: &ObservationEntry) -> Result<f64, SeriesError> {
    let axis = |value: &Option<String>, axis: &'static str| -> Result<f64, SeriesError> {
        let value = value
            .as_deref()
            .ok_or(SeriesError::MissingField("clean-beam size"))?;
        value.parse().map_err(|_| SeriesError::BadBeamAxis {
            axis,
            value: value.to_string(),
        })
    };
    let major = axis(&entry.data.major, "major")?;
    let minor = axis(&entry.data.minor, "minor")?;
    Ok(BEAM_ERROR_FRACTION * (major * minor).sqrt())
}
