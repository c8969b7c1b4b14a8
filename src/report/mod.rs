// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for reading the text reports written by the source-fitting tool.
//!
//! Each report file holds one observation; its date and band are encoded in
//! the filename (e.g. `XTEJ1748-288_27Jun1999_Lband_fit.txt`). Inside, every
//! fitted source gets a block of lines starting with "Fit on".

mod block;
mod error;
mod walk;

pub use block::parse_fit_block;
pub use error::ReadReportError;
pub use walk::{
    date_band_from_filename, parse_report, read_report_dir, read_report_file, ReadPolicy,
    ReportDirContents, DATE_FORMAT,
};
