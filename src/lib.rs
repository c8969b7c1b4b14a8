// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Extract, persist and reconcile the source fits of radio interferometric
images.

Fit reports (one per observation date and band) are parsed into a [FitTable],
which is persisted as flat comma-separated text. When reports are re-read, the
main-source labels of the previous table are carried over by [merge_fit_tables].
Labelled tables can then be turned into per-band time series.
 */

pub mod angle;
mod cli;
pub mod label;
pub mod merge;
pub mod report;
pub mod series;
pub mod table;
pub mod types;

// Re-exports.
pub use angle::{convert_dec, Angle, AngleError, AngleUnit};
pub use cli::{FitsUtils, FitsUtilsError};
pub use label::LabelError;
pub use merge::{merge_fit_tables, MergeSummary};
pub use report::{parse_fit_block, read_report_dir, read_report_file, ReadReportError};
pub use table::{read_fit_table, write_fit_table, ReadTableError, WriteTableError};
pub use types::{BandRecord, FitTable, IsMain, ObservationEntry, SourceRecord};
