// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading fit tables.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ReadTableError, NUM_FIXED_FIELDS, NUM_SOURCE_FIELDS, SEPARATOR};
use crate::{
    angle::{parse_decimal, Angle, AngleUnit},
    report::DATE_FORMAT,
    types::{BandRecord, FitTable, IsMain, ObservationEntry, SourceRecord},
};

/// Parse a buffer containing a fit table. Blank lines are ignored.
pub fn read_fit_table<T: std::io::BufRead>(buf: &mut T) -> Result<FitTable, ReadTableError> {
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut table = FitTable::new();

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            line.clear();
            continue;
        }

        let fields: Vec<&str> = trimmed.split(SEPARATOR).map(|f| f.trim()).collect();
        let (date, band, entry) = parse_row(&fields, line_num)?;
        if table.get(date, &band).is_some() {
            return Err(ReadTableError::DuplicateEntry {
                line_num,
                date: date.format(DATE_FORMAT).to_string(),
                band,
            });
        }
        table.insert(date, band, entry);

        line.clear();
    }

    Ok(table)
}

fn parse_row(
    fields: &[&str],
    line_num: u32,
) -> Result<(NaiveDate, String, ObservationEntry), ReadTableError> {
    if fields.len() < NUM_FIXED_FIELDS {
        return Err(ReadTableError::TooFewFields {
            line_num,
            num_fields: fields.len(),
        });
    }
    let (fixed, source_fields) = fields.split_at(NUM_FIXED_FIELDS);
    if source_fields.len() % NUM_SOURCE_FIELDS != 0 {
        return Err(ReadTableError::IncompleteSource {
            line_num,
            num_fields: source_fields.len(),
        });
    }

    let date = NaiveDate::parse_from_str(fixed[0], DATE_FORMAT).map_err(|_| {
        ReadTableError::BadDate {
            line_num,
            string: fixed[0].to_string(),
        }
    })?;
    if fixed[1].is_empty() {
        return Err(ReadTableError::EmptyBand(line_num));
    }
    let data = BandRecord {
        freq: text(fixed[2]),
        major: text(fixed[3]),
        minor: text(fixed[4]),
    };

    let sources = source_fields
        .chunks_exact(NUM_SOURCE_FIELDS)
        .enumerate()
        .map(|(i_source, chunk)| {
            let first_field = NUM_FIXED_FIELDS + i_source * NUM_SOURCE_FIELDS;
            parse_source(chunk, line_num, first_field)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((date, fixed[1].to_string(), ObservationEntry { data, sources }))
}

/// `fields` are the seven fields of one source, the first of which is field
/// number `first_field` on its line.
fn parse_source(
    fields: &[&str],
    line_num: u32,
    first_field: usize,
) -> Result<SourceRecord, ReadTableError> {
    let angle = |i: usize, unit: AngleUnit| -> Result<Option<Angle>, ReadTableError> {
        let s = fields[i];
        if s.is_empty() {
            return Ok(None);
        }
        Angle::from_sexagesimal(s, unit)
            .map(Some)
            .map_err(|err| ReadTableError::BadAngle {
                line_num,
                field: first_field + i,
                string: s.to_string(),
                err,
            })
    };
    let decimal = |i: usize| -> Result<Option<Decimal>, ReadTableError> {
        let s = fields[i];
        if s.is_empty() {
            return Ok(None);
        }
        parse_decimal(s)
            .map(Some)
            .ok_or_else(|| ReadTableError::BadDecimal {
                line_num,
                field: first_field + i,
                string: s.to_string(),
            })
    };

    Ok(SourceRecord {
        ra: angle(0, AngleUnit::HourAngle)?,
        ra_err: angle(1, AngleUnit::HourAngle)?,
        dec: angle(2, AngleUnit::Degree)?,
        dec_err: angle(3, AngleUnit::Degree)?,
        flux: decimal(4)?,
        flux_err: decimal(5)?,
        is_main: IsMain::from_str(fields[6]).map_err(|_| ReadTableError::BadIsMain {
            line_num,
            field: first_field + 6,
            string: fields[6].to_string(),
        })?,
    })
}

fn text(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
