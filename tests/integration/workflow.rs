// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the whole extract, label, series cycle.

use tempfile::TempDir;

use crate::*;

#[test]
fn test_extract_label_series() {
    let tmp_dir = TempDir::new().unwrap();
    let reports = tmp_dir.path().join("reports");
    std::fs::create_dir(&reports).unwrap();
    make_reports(&reports);
    let table = tmp_dir.path().join("fits.csv");

    // A dry run doesn't write anything.
    let cmd = fitsutils()
        .args(["extract", "--dry-run", "-d"])
        .arg(&reports)
        .arg("-t")
        .arg(&table)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!table.exists());

    let cmd = fitsutils()
        .args(["extract", "-d"])
        .arg(&reports)
        .arg("-t")
        .arg(&table)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&table).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    // Dates are sorted, and uJy are converted to mJy.
    assert!(lines[0].starts_with("27Jun1999,Lband,1.425,0.9,0.4,"), "{}", lines[0]);
    assert!(lines[1].starts_with("01Jul1999,Lband,"), "{}", lines[1]);
    assert!(lines[0].contains(",5,0.02,"), "{}", lines[0]);

    // Nothing is labelled yet.
    let cmd = fitsutils().arg("status").arg("-t").arg(&table).ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("2 observations, 4 sources"), "{stdout}");
    assert!(stdout.contains("27Jun1999 Lband: 2 unlabelled sources"), "{stdout}");

    // Label one observation directly, and the other interactively.
    let cmd = fitsutils()
        .args(["label", "--date", "27Jun1999", "--band", "Lband", "--index", "1", "-t"])
        .arg(&table)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let cmd = fitsutils()
        .args(["label", "-t"])
        .arg(&table)
        .write_stdin("1\n")
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("01Jul1999 Lband (1.425 GHz):"), "{stdout}");
    assert!(!stdout.contains("27Jun1999 Lband (1.425 GHz):"), "{stdout}");

    let cmd = fitsutils().arg("status").arg("-t").arg(&table).ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("Every observation has exactly one main source"),
        "{stdout}"
    );

    // Re-extracting keeps the labels.
    let cmd = fitsutils()
        .args(["extract", "-d"])
        .arg(&reports)
        .arg("-t")
        .arg(&table)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&table).unwrap();
    for line in contents.lines() {
        assert!(line.ends_with(",0.02,1"), "{line}");
    }

    // The first source is 1.5 arcsec west of the main source.
    let series = tmp_dir.path().join("series.csv");
    let cmd = fitsutils()
        .args(["series", "-b", "Lband", "-q", "flux", "-t"])
        .arg(&table)
        .arg("-o")
        .arg(&series)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert_eq!(
        std::fs::read_to_string(&series).unwrap(),
        "date,mjd,value,err\n27Jun1999,51356,5,0.02\n01Jul1999,51360,5,0.02\n"
    );

    let cmd = fitsutils()
        .args(["series", "-b", "Lband", "-t"])
        .arg(&table)
        .arg("-o")
        .arg(&series)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&series).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    let fields: Vec<f64> = lines[1]
        .split(',')
        .skip(1)
        .map(|f| f.parse().unwrap())
        .collect();
    assert_eq!(fields[0], 51356.0);
    assert!((fields[1] - 1.5).abs() < 1e-6, "{}", lines[1]);
}

#[test]
fn test_unknown_band() {
    let tmp_dir = TempDir::new().unwrap();
    let reports = tmp_dir.path().join("reports");
    std::fs::create_dir(&reports).unwrap();
    make_reports(&reports);
    let table = tmp_dir.path().join("fits.csv");
    let cmd = fitsutils()
        .args(["extract", "-d"])
        .arg(&reports)
        .arg("-t")
        .arg(&table)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let cmd = fitsutils()
        .args(["series", "-b", "Cband", "-t"])
        .arg(&table)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("available bands: Lband"), "{stderr}");
}
