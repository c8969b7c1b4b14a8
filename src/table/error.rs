// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::angle::AngleError;

/// Errors associated with reading a fit table.
#[derive(Error, Debug)]
pub enum ReadTableError {
    #[error("Fit table line {line_num}: Expected at least 5 fields (date, band, freq, major, minor), but found {num_fields}")]
    TooFewFields { line_num: u32, num_fields: usize },

    #[error("Fit table line {line_num}: {num_fields} source fields is not a multiple of 7 (ra, ra_err, dec, dec_err, flux, flux_err, is_main)")]
    IncompleteSource { line_num: u32, num_fields: usize },

    #[error("Fit table line {line_num}: Couldn't read '{string}' as a date like '27Jun1999'")]
    BadDate { line_num: u32, string: String },

    #[error("Fit table line {0}: The band name is empty")]
    EmptyBand(u32),

    #[error("Fit table line {line_num}, field {field}: Couldn't read '{string}' as an angle: {err}")]
    BadAngle {
        line_num: u32,
        field: usize,
        string: String,
        err: AngleError,
    },

    #[error("Fit table line {line_num}, field {field}: Couldn't read '{string}' as a decimal number")]
    BadDecimal {
        line_num: u32,
        field: usize,
        string: String,
    },

    #[error("Fit table line {line_num}, field {field}: '{string}' is not a valid is_main value; expected nothing, '0' or '1'")]
    BadIsMain {
        line_num: u32,
        field: usize,
        string: String,
    },

    #[error("Fit table line {line_num}: There is already an entry for {date} {band}")]
    DuplicateEntry {
        line_num: u32,
        date: String,
        band: String,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors associated with writing a fit table.
#[derive(Error, Debug)]
pub enum WriteTableError {
    #[error("Can't write the {field} '{value}' of {date} {band}; fit table fields can't contain commas")]
    CommaInField {
        date: String,
        band: String,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
