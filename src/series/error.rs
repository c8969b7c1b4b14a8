// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::label::LabelError;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("There are no entries for band '{band}'; available bands: {available}")]
    NoSuchBand { band: String, available: String },

    #[error("The source has no {0}")]
    MissingField(&'static str),

    #[error("Couldn't read the clean-beam {axis} axis '{value}' as a number")]
    BadBeamAxis { axis: &'static str, value: String },

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
