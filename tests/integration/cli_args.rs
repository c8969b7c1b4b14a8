// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the command-line arguments themselves.

use tempfile::TempDir;

use crate::*;

#[test]
fn test_help_is_correct() {
    let mut stdouts = vec![];

    let cmd = fitsutils().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    let cmd = fitsutils().arg("-h").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    for stdout in stdouts {
        for sub_command in ["extract", "label", "status", "series"] {
            assert!(stdout.contains(sub_command), "{stdout}");
        }
    }
}

#[test]
fn test_series_help_lists_quantities() {
    let cmd = fitsutils().args(["series", "--help"]).ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("angsep, angsep-brightest, flux"), "{stdout}");
    assert!(stdout.contains("main, leftmost, rightmost"), "{stdout}");
}

#[test]
fn test_missing_table_is_an_error() {
    for sub_command in ["extract", "label", "status", "series"] {
        let cmd = fitsutils().arg(sub_command).ok();
        assert!(cmd.is_err(), "{sub_command} without arguments succeeded");
    }

    let cmd = fitsutils().args(["label", "--date", "27Jun1999"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No fit table was specified"), "{stderr}");
}

#[test]
fn test_bad_arg_file() {
    let tmp_dir = TempDir::new().unwrap();
    let (path, mut f) = make_file_in_dir("args.toml", tmp_dir.path());
    f.write_all(b"this isn't toml").unwrap();
    drop(f);

    let cmd = fitsutils()
        .args(["status", "--table", "nowhere.csv"])
        .ok();
    assert!(cmd.is_err());

    let cmd = fitsutils()
        .arg("series")
        .arg(&path)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Couldn't decode toml structure"), "{stderr}");
}

#[test]
fn test_arg_file_and_save_toml() {
    let tmp_dir = TempDir::new().unwrap();
    let reports = tmp_dir.path().join("reports");
    std::fs::create_dir(&reports).unwrap();
    make_reports(&reports);
    let table = tmp_dir.path().join("fits.csv");

    let (args_file, mut f) = make_file_in_dir("extract.json", tmp_dir.path());
    write!(
        f,
        r#"{{"reports_dir": {:?}, "table": {:?}}}"#,
        reports.display().to_string(),
        table.display().to_string()
    )
    .unwrap();
    drop(f);

    let saved = tmp_dir.path().join("saved.toml");
    let cmd = fitsutils()
        .arg("extract")
        .arg(&args_file)
        .arg("--save-toml")
        .arg(&saved)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(table.exists());

    // The saved arguments reproduce the run.
    let saved_contents = std::fs::read_to_string(&saved).unwrap();
    assert!(saved_contents.contains("reports_dir"), "{saved_contents}");
    std::fs::remove_file(&table).unwrap();
    let cmd = fitsutils().arg("extract").arg(&saved).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(table.exists());
}
