// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading whole fit-report files, and directories of them.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use regex::Regex;

use super::{
    block::{parse_fit_block_at, FIT_BLOCK_START},
    ReadReportError,
};
use crate::{
    cli::Warn,
    types::{FitTable, ObservationEntry},
};

lazy_static::lazy_static! {
    // e.g. "XTEJ1748-288_27Jun1999_Lband_fit.txt"
    static ref DATE_BAND: Regex =
        Regex::new(r"_(?P<date>[0-9]{1,2}[A-Za-z]{3}[0-9]{4})_(?P<band>[A-Za-z]+band)").unwrap();
}

/// The format of dates in report filenames and in the persisted table, e.g.
/// "27Jun1999".
pub const DATE_FORMAT: &str = "%d%b%Y";

/// What to do when a report file in a directory can't be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Stop reading, and return the error.
    #[default]
    Abort,

    /// Report the error, ignore the file and keep reading the other files.
    Skip,
}

/// The result of reading a directory of reports.
#[derive(Debug, Default)]
pub struct ReportDirContents {
    pub table: FitTable,

    /// Files that couldn't be read (only populated with [ReadPolicy::Skip]).
    pub failures: Vec<(PathBuf, ReadReportError)>,
}

/// Get the observation date and band name out of a report's filename, e.g.
/// "foo_27Jun1999_Lband_bar.txt" gives 1999-06-27 and "Lband".
pub fn date_band_from_filename<P: AsRef<Path>>(
    path: P,
) -> Result<(NaiveDate, String), ReadReportError> {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let caps = DATE_BAND
        .captures(&filename)
        .ok_or_else(|| ReadReportError::NoDateBandInFilename(filename.clone()))?;
    let date = NaiveDate::parse_from_str(&caps["date"], DATE_FORMAT).map_err(|_| {
        ReadReportError::BadFilenameDate {
            filename: filename.clone(),
            date: caps["date"].to_string(),
        }
    })?;
    Ok((date, caps["band"].to_string()))
}

/// Split a report into fit blocks and parse each of them, appending the
/// sources to `entry` in order. The band data of the last block read replaces
/// whatever `entry` had. Returns the number of blocks read.
pub fn parse_report<T: BufRead>(
    buf: &mut T,
    entry: &mut ObservationEntry,
) -> Result<usize, ReadReportError> {
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut num_blocks = 0;
    // The line number of the first line of `block`, and the block's lines.
    let mut block_start: u32 = 0;
    let mut block: Vec<String> = vec![];

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;
        let trimmed = line.trim();

        if trimmed.starts_with(FIT_BLOCK_START) {
            num_blocks += flush_block(&mut block, block_start, entry)?;
            block_start = line_num;
            block.push(trimmed.to_string());
        } else if !block.is_empty() {
            block.push(trimmed.to_string());
        }

        line.clear();
    }
    num_blocks += flush_block(&mut block, block_start, entry)?;

    Ok(num_blocks)
}

/// Parse a completed block (if there is one) into `entry`, and empty it.
fn flush_block(
    block: &mut Vec<String>,
    block_start: u32,
    entry: &mut ObservationEntry,
) -> Result<usize, ReadReportError> {
    if block.is_empty() {
        return Ok(0);
    }
    let (source, band) = parse_fit_block_at(block.as_slice(), block_start)?;
    entry.sources.push(source);
    entry.data = band;
    block.clear();
    Ok(1)
}

/// Read one report file into `table`, under the date and band in its
/// filename. Returns the number of sources read.
pub fn read_report_file<P: AsRef<Path>>(
    file: P,
    table: &mut FitTable,
) -> Result<usize, ReadReportError> {
    fn inner(file: &Path, table: &mut FitTable) -> Result<usize, ReadReportError> {
        let (date, band) = date_band_from_filename(file)?;
        info!("Loading fit data from {}", file.display());

        // Parse into a scratch entry so a bad file leaves `table` untouched.
        let mut entry = table.get(date, &band).cloned().unwrap_or_default();
        let num_blocks = parse_report(&mut BufReader::new(File::open(file)?), &mut entry)?;
        if num_blocks == 0 {
            format!("No fit blocks found in {}", file.display()).warn();
            return Ok(0);
        }
        debug!(
            "{}: {num_blocks} sources for {} {band}",
            file.display(),
            date.format(DATE_FORMAT)
        );
        table.insert(date, band, entry);
        Ok(num_blocks)
    }
    let file = file.as_ref();
    inner(file, table).map_err(|err| ReadReportError::InFile {
        file: file.display().to_string(),
        err: Box::new(err),
    })
}

/// Read every report file in `dir`. Files are visited in lexical order of
/// their paths; subdirectories are ignored.
pub fn read_report_dir<P: AsRef<Path>>(
    dir: P,
    policy: ReadPolicy,
) -> Result<ReportDirContents, ReadReportError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ReadReportError::NotADir(dir.to_path_buf()));
    }

    let mut files = vec![];
    for dir_entry in std::fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Ignoring {}; not a file", path.display());
        }
    }
    files.sort_unstable();

    let mut contents = ReportDirContents::default();
    for file in files {
        match read_report_file(&file, &mut contents.table) {
            Ok(_) => (),
            Err(e) if policy == ReadPolicy::Skip => {
                [
                    format!("Skipping {}", file.display()).into(),
                    e.to_string().into(),
                ]
                .warn();
                contents.failures.push((file, e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(contents)
}
