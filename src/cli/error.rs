// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all fitsutils-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{extract::ExtractArgsError, label::LabelArgsError, series::SeriesArgsError};
use crate::{
    label::LabelError,
    report::ReadReportError,
    series::SeriesError,
    table::{ReadTableError, WriteTableError},
};

/// The *only* publicly visible error from fitsutils. Errors about files the
/// user handed us carry a hint on what those files should look like.
#[derive(Error, Debug)]
pub enum FitsUtilsError {
    /// An error related to fit reports.
    #[error("{0}\n\nFit reports are named like 'XTEJ1748_27Jun1999_Lband.txt' and contain blocks starting with 'Fit on'")]
    Report(String),

    /// An error related to fit tables.
    #[error("{0}\n\nFit table rows look like 'date,band,freq,major,minor,' followed by 7 fields per source")]
    Table(String),

    /// An error related to labelling main sources.
    #[error("{0}")]
    Label(String),

    /// An error related to time series.
    #[error("{0}")]
    Series(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON, with the same keys as the long command-line flags (using underscores)")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// Binary sub-command errors.

impl From<ExtractArgsError> for FitsUtilsError {
    fn from(e: ExtractArgsError) -> Self {
        let s = e.to_string();
        match e {
            ExtractArgsError::NoReportsDir => Self::Report(s),
            ExtractArgsError::NoTable => Self::Table(s),
        }
    }
}

impl From<LabelArgsError> for FitsUtilsError {
    fn from(e: LabelArgsError) -> Self {
        let s = e.to_string();
        match e {
            LabelArgsError::NoTable | LabelArgsError::NoSuchEntry { .. } => Self::Table(s),
            LabelArgsError::IncompleteKey | LabelArgsError::BadDate(_) => Self::Label(s),
        }
    }
}

impl From<SeriesArgsError> for FitsUtilsError {
    fn from(e: SeriesArgsError) -> Self {
        let s = e.to_string();
        match e {
            SeriesArgsError::NoTable => Self::Table(s),
            SeriesArgsError::NoBand
            | SeriesArgsError::BadQuantity(_)
            | SeriesArgsError::BadReference(_) => Self::Series(s),
        }
    }
}

// Library code errors.

impl From<ReadReportError> for FitsUtilsError {
    fn from(e: ReadReportError) -> Self {
        match e {
            ReadReportError::IO(e) => Self::from(e),
            _ => Self::Report(e.to_string()),
        }
    }
}

impl From<ReadTableError> for FitsUtilsError {
    fn from(e: ReadTableError) -> Self {
        match e {
            ReadTableError::IO(e) => Self::from(e),
            _ => Self::Table(e.to_string()),
        }
    }
}

impl From<WriteTableError> for FitsUtilsError {
    fn from(e: WriteTableError) -> Self {
        let s = e.to_string();
        match e {
            WriteTableError::CommaInField { .. } => Self::Table(s),
            WriteTableError::IO(e) => Self::from(e),
        }
    }
}

impl From<LabelError> for FitsUtilsError {
    fn from(e: LabelError) -> Self {
        let s = e.to_string();
        match e {
            LabelError::IndexOutOfRange { .. }
            | LabelError::NoMainSource
            | LabelError::SeveralMainSources(_) => Self::Label(s),
            LabelError::IO(e) => Self::from(e),
        }
    }
}

impl From<SeriesError> for FitsUtilsError {
    fn from(e: SeriesError) -> Self {
        let s = e.to_string();
        match e {
            SeriesError::NoSuchBand { .. }
            | SeriesError::MissingField(_)
            | SeriesError::BadBeamAxis { .. } => Self::Series(s),
            SeriesError::Label(e) => Self::from(e),
            SeriesError::IO(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for FitsUtilsError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
