// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cli_args;
mod workflow;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;

fn fitsutils() -> Command {
    Command::cargo_bin("fitsutils").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Two fitted sources; the second is 1.5 arcsec east of the first.
const REPORT_TWO_SOURCES: &str = indoc! {"
    Fitting results for XTEJ1748-288
    Fit on XTEJ1748-288 component 1
    --- ra:  17:48:05.00 +/- 0.001 s
    --- ra:  256.12 +/- 0.02 pixels
    --- dec: -00.00.00.0 +/- 0.01 arcsec
    --- dec: 254.99 +/- 0.03 pixels
    Clean beam size:
      0.9 arcsec
      0.4 arcsec
    --- Integrated: 1.234 +/- 0.056 mJy
    --- frequency: 1.425 GHz
    Fit on XTEJ1748-288 component 2
    --- ra:  17:48:05.10 +/- 0.001 s
    --- dec: -00.00.00.0 +/- 0.01 arcsec
    Clean beam size:
      0.9 arcsec
      0.4 arcsec
    --- Integrated: 5000 +/- 20 uJy
    --- frequency: 1.425 GHz
"};

/// Write the standard set of reports into `dir`.
fn make_reports(dir: &Path) {
    for name in [
        "XTEJ1748_27Jun1999_Lband_fits.txt",
        "XTEJ1748_01Jul1999_Lband_fits.txt",
    ] {
        let (_, mut f) = make_file_in_dir(name, dir);
        f.write_all(REPORT_TWO_SOURCES.as_bytes()).unwrap();
    }
}
