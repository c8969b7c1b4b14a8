// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use approx::assert_abs_diff_eq;
use rust_decimal::Decimal;

use super::*;
use crate::{
    angle::{Angle, AngleUnit},
    types::{BandRecord, IsMain},
};

const ARCSEC: f64 = std::f64::consts::PI / 180.0 / 3600.0;

fn date(d: u32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(1999, m, d).unwrap()
}

fn source(ra: &str, dec: &str, flux: &str, is_main: IsMain) -> SourceRecord {
    SourceRecord {
        ra: Some(Angle::from_sexagesimal(ra, AngleUnit::HourAngle).unwrap()),
        ra_err: Some(Angle::from_sexagesimal("00:00:00.001", AngleUnit::HourAngle).unwrap()),
        dec: Some(Angle::from_sexagesimal(dec, AngleUnit::Degree).unwrap()),
        dec_err: Some(Angle::from_sexagesimal("00:00:00.01", AngleUnit::Degree).unwrap()),
        flux: Some(Decimal::from_str(flux).unwrap()),
        flux_err: Some(Decimal::from_str("0.05").unwrap()),
        is_main,
    }
}

fn get_test_table() -> FitTable {
    let mut table = FitTable::new();
    // 0.1 s of RA is 1.5 arcsec on the equator.
    table.insert(
        date(27, 6),
        "Lband".to_string(),
        ObservationEntry {
            data: BandRecord {
                freq: Some("1.425".to_string()),
                major: Some("0.9".to_string()),
                minor: Some("0.4".to_string()),
            },
            sources: vec![
                source("17:48:05.00", "00:00:00", "1", IsMain::NotMain),
                source("17:48:05.10", "00:00:00", "5", IsMain::Main),
                source("17:48:05.00", "-00:00:02", "3", IsMain::NotMain),
            ],
        },
    );
    table.insert(
        date(1, 7),
        "Lband".to_string(),
        ObservationEntry {
            sources: vec![source("17:48:05.10", "00:00:00", "4.5", IsMain::Main)],
            ..Default::default()
        },
    );
    // Not labelled yet.
    table.insert(
        date(2, 7),
        "Lband".to_string(),
        ObservationEntry {
            sources: vec![
                source("17:48:05.10", "00:00:00", "4.5", IsMain::Unknown),
                source("17:48:05.00", "00:00:00", "1", IsMain::Unknown),
            ],
            ..Default::default()
        },
    );
    table.insert(
        date(27, 6),
        "Cband".to_string(),
        ObservationEntry {
            sources: vec![source("17:48:05.10", "00:00:00", "2", IsMain::Main)],
            ..Default::default()
        },
    );
    table
}

fn params(quantity: Quantity, reference: ReferenceMode) -> SeriesParams {
    SeriesParams {
        quantity,
        reference,
        beam_error: false,
    }
}

fn values(points: &[SeriesPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

#[test]
fn test_separation_along_ra() {
    let a = SkyPosition {
        ra: 0.0,
        ra_err: 0.1 * ARCSEC,
        dec: 0.0,
        dec_err: 0.2 * ARCSEC,
    };
    let b = SkyPosition { ra: ARCSEC, ..a };
    let (sep, err) = angular_separation(&a, &b);
    assert_abs_diff_eq!(sep, 1.0, epsilon = 1e-6);
    // Only the RA errors matter for this direction.
    assert_abs_diff_eq!(err, 0.1 * 2_f64.sqrt(), epsilon = 1e-6);

    // The order doesn't matter.
    let (sep2, err2) = angular_separation(&b, &a);
    assert_abs_diff_eq!(sep, sep2, epsilon = 1e-10);
    assert_abs_diff_eq!(err, err2, epsilon = 1e-10);
}

#[test]
fn test_separation_along_dec() {
    let a = SkyPosition {
        ra: 4.66,
        ra_err: 0.1 * ARCSEC,
        dec: -28.5_f64.to_radians(),
        dec_err: 0.03 * ARCSEC,
    };
    let b = SkyPosition {
        dec: a.dec - 2.0 * ARCSEC,
        dec_err: 0.04 * ARCSEC,
        ..a
    };
    let (sep, err) = angular_separation(&a, &b);
    assert_abs_diff_eq!(sep, 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(err, 0.05, epsilon = 1e-6);
}

#[test]
fn test_separation_shrinks_with_declination() {
    // One degree of RA at Dec 60° is half a degree on the sky.
    let a = SkyPosition {
        ra: 0.0,
        ra_err: 0.0,
        dec: 60_f64.to_radians(),
        dec_err: 0.0,
    };
    let b = SkyPosition {
        ra: (1.0 / 3600.0_f64).to_radians(),
        ..a
    };
    let (sep, err) = angular_separation(&a, &b);
    assert_abs_diff_eq!(sep, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(err, 0.0);
}

#[test]
fn test_coincident_positions() {
    let a = SkyPosition {
        ra: 1.0,
        ra_err: 0.3 * ARCSEC,
        dec: 0.0,
        dec_err: 0.4 * ARCSEC,
    };
    let (sep, err) = angular_separation(&a, &a);
    assert_abs_diff_eq!(sep, 0.0);
    assert_abs_diff_eq!(err, 0.5_f64.sqrt(), epsilon = 1e-6);
}

#[test]
fn test_position_needs_all_fields() {
    let mut s = source("17:48:05.00", "00:00:00", "1", IsMain::NotMain);
    assert!(SkyPosition::from_source(&s).is_ok());
    s.dec_err = None;
    assert!(matches!(
        SkyPosition::from_source(&s),
        Err(SeriesError::MissingField("Dec error"))
    ));
}

#[test]
fn test_mjd() {
    assert_abs_diff_eq!(mjd(date(27, 6)), 51356.0);
    assert_abs_diff_eq!(mjd(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()), 51544.0);
    assert_abs_diff_eq!(mjd(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()), 57754.0);
    // Consecutive days are one MJD apart.
    assert_abs_diff_eq!(mjd(date(28, 6)) - mjd(date(27, 6)), 1.0);
}

#[test]
fn test_reference_source() {
    let table = get_test_table();
    let entry = table.get(date(27, 6), "Lband").unwrap();
    assert_eq!(reference_source(entry, ReferenceMode::Main).unwrap().0, 1);
    assert_eq!(reference_source(entry, ReferenceMode::Leftmost).unwrap().0, 1);
    // Sources 0 and 2 have the same RA; the first is used.
    assert_eq!(reference_source(entry, ReferenceMode::Rightmost).unwrap().0, 0);

    let unlabelled = table.get(date(2, 7), "Lband").unwrap();
    assert!(matches!(
        reference_source(unlabelled, ReferenceMode::Main),
        Err(SeriesError::Label(_))
    ));
    assert_eq!(
        reference_source(unlabelled, ReferenceMode::Rightmost)
            .unwrap()
            .0,
        1
    );
}

#[test]
fn test_angsep_series() {
    let table = get_test_table();
    let points = band_series(
        &table,
        "Lband",
        &params(Quantity::AngSep, ReferenceMode::Main),
    )
    .unwrap();
    // The unlabelled observation is skipped, and the observation with only
    // its main source has nothing to give.
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.date == date(27, 6)));
    assert_abs_diff_eq!(points[0].mjd, 51356.0);
    assert_abs_diff_eq!(points[0].value, 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(points[1].value, 2.5, epsilon = 1e-6);

    let points = band_series(
        &table,
        "Lband",
        &params(Quantity::AngSep, ReferenceMode::Rightmost),
    )
    .unwrap();
    let values = values(&points);
    // Sources east of the reference (larger RA) are negative.
    assert_eq!(values.len(), 3);
    assert_abs_diff_eq!(values[0], -1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(values[1], 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(values[2], -1.5, epsilon = 1e-6);
    assert_eq!(points[2].date, date(2, 7));
}

#[test]
fn test_beam_error() {
    let table = get_test_table();
    let without = band_series(
        &table,
        "Lband",
        &params(Quantity::AngSep, ReferenceMode::Main),
    )
    .unwrap();
    let with = band_series(
        &table,
        "Lband",
        &SeriesParams {
            beam_error: true,
            ..params(Quantity::AngSep, ReferenceMode::Main)
        },
    )
    .unwrap();
    assert_eq!(without.len(), with.len());
    for (w, wo) in with.iter().zip(without.iter()) {
        assert_abs_diff_eq!(w.value, wo.value);
        // 0.1 * sqrt(0.9 * 0.4)
        assert_abs_diff_eq!(w.err, wo.err.hypot(0.06), epsilon = 1e-10);
    }
}

#[test]
fn test_angsep_brightest_series() {
    let table = get_test_table();
    let points = band_series(
        &table,
        "Lband",
        &params(Quantity::AngSepBrightest, ReferenceMode::Main),
    )
    .unwrap();
    assert_eq!(points.len(), 2);
    // Source 2 is the brightest of the others.
    assert_eq!(points[0].date, date(27, 6));
    assert_abs_diff_eq!(points[0].value, 2.5, epsilon = 1e-6);
    // No other sources.
    assert_eq!(points[1].date, date(1, 7));
    assert_abs_diff_eq!(points[1].value, 0.0);
    assert_abs_diff_eq!(points[1].err, 0.0);
}

#[test]
fn test_flux_series() {
    let table = get_test_table();
    let points = band_series(
        &table,
        "Lband",
        &params(Quantity::Flux, ReferenceMode::Main),
    )
    .unwrap();
    assert_eq!(values(&points), vec![5.0, 4.5]);
    for p in &points {
        assert_abs_diff_eq!(p.err, 0.05, epsilon = 1e-12);
    }

    let points = band_series(
        &table,
        "Cband",
        &params(Quantity::Flux, ReferenceMode::Leftmost),
    )
    .unwrap();
    assert_eq!(values(&points), vec![2.0]);
}

#[test]
fn test_unknown_band() {
    let result = band_series(
        &get_test_table(),
        "Xband",
        &params(Quantity::Flux, ReferenceMode::Main),
    );
    match result {
        Err(SeriesError::NoSuchBand { band, available }) => {
            assert_eq!(band, "Xband");
            assert_eq!(available, "Cband, Lband");
        }
        _ => panic!("Expected an unknown band, got {result:?}"),
    }
}

#[test]
fn test_enum_strings() {
    assert_eq!(Quantity::from_str("angsep-brightest").unwrap(), Quantity::AngSepBrightest);
    assert_eq!(ReferenceMode::Leftmost.to_string(), "leftmost");
    assert_eq!(*QUANTITIES_COMMA_SEPARATED, "angsep, angsep-brightest, flux");
    assert_eq!(*REFERENCE_MODES_COMMA_SEPARATED, "main, leftmost, rightmost");
}

#[test]
fn test_write_series_csv() {
    let points = [
        SeriesPoint {
            date: date(27, 6),
            mjd: 51356.0,
            value: -1.5,
            err: 0.25,
        },
        SeriesPoint {
            date: date(1, 7),
            mjd: 51360.0,
            value: 0.0,
            err: 0.0,
        },
    ];
    let mut buf = Vec::<u8>::new();
    write_series_csv(&mut buf, &points).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "date,mjd,value,err\n27Jun1999,51356,-1.5,0.25\n01Jul1999,51360,0,0\n"
    );

    let mut buf = Vec::<u8>::new();
    write_series_csv(&mut buf, &[]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "date,mjd,value,err\n");
}
