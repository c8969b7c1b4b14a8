// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Angular separations with propagated errors.

use super::SeriesError;
use crate::{angle::Angle, types::SourceRecord};

/// A position on the sky and its 1σ errors, all in radians. The RA error is
/// an error on the RA coordinate itself (not scaled by cos Dec).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    pub ra: f64,
    pub ra_err: f64,
    pub dec: f64,
    pub dec_err: f64,
}

impl SkyPosition {
    /// Get the position of a source. All four positional fields must be
    /// present.
    pub fn from_source(source: &SourceRecord) -> Result<SkyPosition, SeriesError> {
        let get = |field: &Option<Angle>, name: &'static str| {
            field
                .as_ref()
                .map(|a| a.to_radians())
                .ok_or(SeriesError::MissingField(name))
        };
        Ok(SkyPosition {
            ra: get(&source.ra, "RA")?,
            ra_err: get(&source.ra_err, "RA error")?,
            dec: get(&source.dec, "Dec")?,
            dec_err: get(&source.dec_err, "Dec error")?,
        })
    }
}

/// The great-circle distance between two positions and its 1σ error, both in
/// arcseconds. The error is propagated from the four positional errors
/// through cos(sep) = sin δ1 sin δ2 + cos δ1 cos δ2 cos(α1 - α2).
pub fn angular_separation(a: &SkyPosition, b: &SkyPosition) -> (f64, f64) {
    let (s_d1, c_d1) = a.dec.sin_cos();
    let (s_d2, c_d2) = b.dec.sin_cos();
    let (s_dra, c_dra) = (a.ra - b.ra).sin_cos();

    // atan2 keeps small separations accurate, where acos doesn't.
    let sin_sep = (c_d2 * s_dra).hypot(c_d1 * s_d2 - s_d1 * c_d2 * c_dra);
    let cos_sep = s_d1 * s_d2 + c_d1 * c_d2 * c_dra;
    let sep = sin_sep.atan2(cos_sep);

    // Partial derivatives of cos(sep).
    let dc_dra1 = -c_d1 * c_d2 * s_dra;
    let dc_dra2 = c_d1 * c_d2 * s_dra;
    let dc_ddec1 = c_d1 * s_d2 - s_d1 * c_d2 * c_dra;
    let dc_ddec2 = s_d1 * c_d2 - c_d1 * s_d2 * c_dra;
    let dc = ((dc_dra1 * a.ra_err).powi(2)
        + (dc_ddec1 * a.dec_err).powi(2)
        + (dc_dra2 * b.ra_err).powi(2)
        + (dc_ddec2 * b.dec_err).powi(2))
    .sqrt();

    let err = if sin_sep > 0.0 {
        dc / sin_sep
    } else {
        // The derivative is undefined when the positions coincide; use the
        // combined positional error instead.
        ((a.ra_err * c_d1).powi(2)
            + a.dec_err.powi(2)
            + (b.ra_err * c_d2).powi(2)
            + b.dec_err.powi(2))
        .sqrt()
    };

    (sep.to_degrees() * 3600.0, err.to_degrees() * 3600.0)
}
