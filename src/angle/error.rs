// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AngleError {
    #[error("Cannot read an angle from an empty string")]
    Empty,

    /// One to three fields are expected; this error is used for anything
    /// else.
    #[error("Did not get between one and three sexagesimal fields: '{0}'")]
    WrongFieldCount(String),

    #[error("Sexagesimal field {field} of '{input}' is empty")]
    EmptyField { input: String, field: usize },

    #[error("Sexagesimal field {field} of '{input}' is not an unsigned decimal number (less than 60 after the first field)")]
    InvalidField { input: String, field: usize },

    #[error("The angle '{0}' is too large")]
    OutOfRange(String),
}
