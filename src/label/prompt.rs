// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Asking a person which source is the main one.

use std::fmt::Display;
use std::io::{BufRead, Write};

use chrono::NaiveDate;

use super::LabelError;
use crate::{
    report::DATE_FORMAT,
    types::{IsMain, ObservationEntry, SourceRecord},
};

/// What was answered when asked for a main source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The index of the main source.
    Index(usize),

    /// Leave this entry as it is.
    Skip,

    /// Stop asking.
    Quit,
}

/// List the sources of an entry on `output` and read the index of its main
/// source from `input`. An empty line skips the entry, and "q" (or the end of
/// the input) quits. Anything that isn't a valid index is asked for again.
pub fn prompt_for_main_source<R: BufRead, W: Write>(
    date: NaiveDate,
    band: &str,
    entry: &ObservationEntry,
    input: &mut R,
    output: &mut W,
) -> Result<Answer, LabelError> {
    writeln!(
        output,
        "{} {band} ({} GHz):",
        date.format(DATE_FORMAT),
        or_unknown(&entry.data.freq)
    )?;
    for (i, source) in entry.sources.iter().enumerate() {
        writeln!(output, "  [{i}] {}", describe(source))?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Main source (empty to skip, q to quit): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(Answer::Quit);
        }
        match line.trim() {
            "" => return Ok(Answer::Skip),
            "q" | "Q" => return Ok(Answer::Quit),
            s => match s.parse::<usize>() {
                Ok(i) if i < entry.sources.len() => return Ok(Answer::Index(i)),
                _ => writeln!(
                    output,
                    "'{s}' isn't one of the sources (0 to {})",
                    entry.sources.len().saturating_sub(1)
                )?,
            },
        }
    }
}

fn describe(source: &SourceRecord) -> String {
    let label = match source.is_main {
        IsMain::Main => " (main)",
        IsMain::NotMain => "",
        IsMain::Unknown => " (?)",
    };
    format!(
        "RA {} Dec {} flux {} +/- {} mJy{label}",
        or_unknown(&source.ra),
        or_unknown(&source.dec),
        or_unknown(&source.flux),
        or_unknown(&source.flux_err),
    )
}

fn or_unknown<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string())
}
