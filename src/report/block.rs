// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of a single fit block.
//!
//! A block is the run of lines that starts at a "Fit on" line. Each line is
//! looked at on its own (except for the clean-beam axes, which sit on the two
//! lines after "Clean beam size") and may update some fields of the source or
//! band being read. Lines that aren't recognised are ignored.

use regex::Regex;
use rust_decimal::Decimal;

use super::ReadReportError;
use crate::{
    angle::{convert_dec, parse_decimal, Angle, AngleUnit},
    types::{BandRecord, IsMain, SourceRecord},
};

pub(super) const FIT_BLOCK_START: &str = "Fit on";
const RA_PREFIX: &str = "--- ra:";
const DEC_PREFIX: &str = "--- dec:";
const PIXELS_SUFFIX: &str = "pixels";
const CLEAN_BEAM_PREFIX: &str = "Clean beam size";
const INTEGRATED_PREFIX: &str = "--- Integrated:";
const FREQUENCY_PREFIX: &str = "--- frequency:";

lazy_static::lazy_static! {
    static ref RA: Regex =
        Regex::new(r"(?P<value>[0-9:.]+)\s\+/-\s(?P<error>[0-9.]+)\ss").unwrap();

    static ref DEC: Regex =
        Regex::new(r"(?P<value>-?[0-9.]+)\s\+/-\s(?P<error>[0-9.]+)\sarcsec").unwrap();

    static ref BEAM_AXIS: Regex = Regex::new(r"(?P<value>-?[0-9.]+)\sarcsec").unwrap();

    static ref INTEGRATED: Regex =
        Regex::new(r"(?P<value>[0-9.]+)\s\+/-\s(?P<error>[0-9.]+)\s(?P<prefix>[mu])Jy").unwrap();

    static ref FREQUENCY: Regex = Regex::new(r"(?P<value>[0-9.]+)\sGHz").unwrap();
}

/// Something learned from one line (or, for the clean beam, three lines) of a
/// fit block.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum BlockItem {
    Ra { ra: Angle, ra_err: Angle },
    Dec { dec: Angle, dec_err: Angle },
    Beam { major: String, minor: String },
    Integrated { flux: Decimal, flux_err: Decimal },
    Frequency(String),
}

/// Parse the lines of one fit block into the source it describes and the
/// band it was observed in. Only fields found in the block are set, and
/// `is_main` is always [IsMain::Unknown].
pub fn parse_fit_block<S: AsRef<str>>(
    lines: &[S],
) -> Result<(SourceRecord, BandRecord), ReadReportError> {
    parse_fit_block_at(lines, 1)
}

/// The same as [parse_fit_block], but `first_line_num` is used as the line
/// number of the first line in error messages.
pub(super) fn parse_fit_block_at<S: AsRef<str>>(
    lines: &[S],
    first_line_num: u32,
) -> Result<(SourceRecord, BandRecord), ReadReportError> {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref().trim()).collect();

    let mut source = SourceRecord {
        is_main: IsMain::Unknown,
        ..Default::default()
    };
    let mut band = BandRecord::default();
    for i_line in 0..lines.len() {
        let line_num = first_line_num + i_line as u32;
        if let Some(item) = parse_block_window(&lines[i_line..], line_num)? {
            apply_block_item(&mut source, &mut band, item);
        }
    }

    Ok((source, band))
}

fn apply_block_item(source: &mut SourceRecord, band: &mut BandRecord, item: BlockItem) {
    match item {
        BlockItem::Ra { ra, ra_err } => {
            source.ra = Some(ra);
            source.ra_err = Some(ra_err);
        }
        BlockItem::Dec { dec, dec_err } => {
            source.dec = Some(dec);
            source.dec_err = Some(dec_err);
        }
        BlockItem::Beam { major, minor } => {
            band.major = Some(major);
            band.minor = Some(minor);
        }
        BlockItem::Integrated { flux, flux_err } => {
            source.flux = Some(flux);
            source.flux_err = Some(flux_err);
        }
        BlockItem::Frequency(freq) => band.freq = Some(freq),
    }
}

/// Look at the first line of `window` (the rest of the block from this line
/// onwards) and return what it says, if anything.
pub(super) fn parse_block_window(
    window: &[&str],
    line_num: u32,
) -> Result<Option<BlockItem>, ReadReportError> {
    let line = match window.first() {
        Some(l) => *l,
        None => return Ok(None),
    };

    let item = if line.starts_with(RA_PREFIX) && !line.ends_with(PIXELS_SUFFIX) {
        parse_ra_line(line, line_num)?
    } else if line.starts_with(DEC_PREFIX) && !line.ends_with(PIXELS_SUFFIX) {
        parse_dec_line(line, line_num)?
    } else if line.starts_with(CLEAN_BEAM_PREFIX) {
        match window {
            [_, major, minor, ..] => parse_beam_lines(major, minor, line_num)?,
            _ => return Err(ReadReportError::MissingBeamAxes(line_num)),
        }
    } else if line.starts_with(INTEGRATED_PREFIX) {
        parse_integrated_line(line, line_num)?
    } else if line.starts_with(FREQUENCY_PREFIX) {
        parse_frequency_line(line, line_num)?
    } else {
        return Ok(None);
    };

    Ok(Some(item))
}

/// e.g. `--- ra:  17:48:05.0512 +/- 0.0003 s`
pub(super) fn parse_ra_line(line: &str, line_num: u32) -> Result<BlockItem, ReadReportError> {
    let caps = RA.captures(line).ok_or_else(|| malformed(line, line_num, "RA"))?;
    Ok(BlockItem::Ra {
        ra: angle(&caps["value"], AngleUnit::HourAngle, line, line_num)?,
        ra_err: seconds(&caps["error"], AngleUnit::HourAngle, line, line_num)?,
    })
}

/// e.g. `--- dec: -28.28.25.812 +/- 0.004 arcsec`
pub(super) fn parse_dec_line(line: &str, line_num: u32) -> Result<BlockItem, ReadReportError> {
    let caps = DEC
        .captures(line)
        .ok_or_else(|| malformed(line, line_num, "Dec"))?;
    Ok(BlockItem::Dec {
        dec: angle(
            &convert_dec(&caps["value"]),
            AngleUnit::Degree,
            line,
            line_num,
        )?,
        dec_err: seconds(&caps["error"], AngleUnit::Degree, line, line_num)?,
    })
}

/// The two lines following "Clean beam size", e.g. `  0.75 arcsec` and
/// `  0.31 arcsec`. `line_num` is that of the "Clean beam size" line.
pub(super) fn parse_beam_lines(
    major_line: &str,
    minor_line: &str,
    line_num: u32,
) -> Result<BlockItem, ReadReportError> {
    let major = BEAM_AXIS
        .captures(major_line)
        .ok_or_else(|| malformed(major_line, line_num + 1, "clean-beam major axis"))?;
    let minor = BEAM_AXIS
        .captures(minor_line)
        .ok_or_else(|| malformed(minor_line, line_num + 2, "clean-beam minor axis"))?;
    Ok(BlockItem::Beam {
        major: major["value"].to_string(),
        minor: minor["value"].to_string(),
    })
}

/// e.g. `--- Integrated: 1.234 +/- 0.056 mJy`. Fluxes in uJy are converted to
/// mJy.
pub(super) fn parse_integrated_line(
    line: &str,
    line_num: u32,
) -> Result<BlockItem, ReadReportError> {
    let caps = INTEGRATED
        .captures(line)
        .ok_or_else(|| malformed(line, line_num, "integrated flux density"))?;
    let mut flux = decimal(&caps["value"], line_num)?;
    let mut flux_err = decimal(&caps["error"], line_num)?;
    if &caps["prefix"] == "u" {
        flux /= Decimal::ONE_THOUSAND;
        flux_err /= Decimal::ONE_THOUSAND;
    }
    Ok(BlockItem::Integrated { flux, flux_err })
}

/// e.g. `--- frequency: 1.425 GHz`
pub(super) fn parse_frequency_line(
    line: &str,
    line_num: u32,
) -> Result<BlockItem, ReadReportError> {
    let caps = FREQUENCY
        .captures(line)
        .ok_or_else(|| malformed(line, line_num, "frequency"))?;
    Ok(BlockItem::Frequency(caps["value"].to_string()))
}

fn malformed(line: &str, line_num: u32, kind: &'static str) -> ReadReportError {
    ReadReportError::MalformedLine {
        line_num,
        kind,
        line: line.to_string(),
    }
}

fn angle(s: &str, unit: AngleUnit, line: &str, line_num: u32) -> Result<Angle, ReadReportError> {
    Angle::from_sexagesimal(s, unit).map_err(|err| ReadReportError::BadAngle {
        line_num,
        line: line.to_string(),
        err,
    })
}

/// Positional errors are given in seconds of the position's unit, and may be
/// 60 or more.
fn seconds(s: &str, unit: AngleUnit, line: &str, line_num: u32) -> Result<Angle, ReadReportError> {
    Angle::from_seconds(decimal(s, line_num)?, unit).map_err(|err| ReadReportError::BadAngle {
        line_num,
        line: line.to_string(),
        err,
    })
}

fn decimal(s: &str, line_num: u32) -> Result<Decimal, ReadReportError> {
    parse_decimal(s).ok_or_else(|| ReadReportError::BadDecimal {
        line_num,
        string: s.to_string(),
    })
}
