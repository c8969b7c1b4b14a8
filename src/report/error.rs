// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::angle::AngleError;

/// Errors associated with reading fit reports.
#[derive(Error, Debug)]
pub enum ReadReportError {
    #[error("Report line {line_num}: Couldn't read the {kind} from '{line}'")]
    MalformedLine {
        line_num: u32,
        kind: &'static str,
        line: String,
    },

    #[error("Report line {line_num}: Couldn't read an angle from '{line}': {err}")]
    BadAngle {
        line_num: u32,
        line: String,
        err: AngleError,
    },

    #[error("Report line {line_num}: Couldn't read '{string}' as a decimal number")]
    BadDecimal { line_num: u32, string: String },

    #[error("Report line {0}: Found 'Clean beam size', but not the two beam axes on the lines after it")]
    MissingBeamAxes(u32),

    #[error("Report filename '{0}' doesn't contain a date and band like '_27Jun1999_Lband'")]
    NoDateBandInFilename(String),

    #[error("Report filename '{filename}': '{date}' is not a date like '27Jun1999'")]
    BadFilenameDate { filename: String, date: String },

    #[error("'{}' is not a directory", .0.display())]
    NotADir(PathBuf),

    #[error("{file}: {err}")]
    InFile {
        file: String,
        err: Box<ReadReportError>,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
