// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Exact sexagesimal angles.

Positions in fit reports (and in the persisted table) are sexagesimal text.
Converting them to floats and back would make it impossible to recognise the
same measurement after a round trip, so an [Angle] keeps the total number of
seconds of its unit as a [Decimal]. Comparisons are done in arcseconds, which
is the same as comparing decimal degrees.
 */

mod error;

pub use error::AngleError;

use std::cmp::Ordering;
use std::fmt::Display;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// The unit that the leading sexagesimal field of an [Angle] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum AngleUnit {
    /// Hours, minutes and seconds of time. One second of time is 15
    /// arcseconds.
    #[strum(serialize = "hourangle")]
    HourAngle,

    /// Degrees, arcminutes and arcseconds.
    #[strum(serialize = "deg")]
    Degree,
}

impl AngleUnit {
    /// The number of arcseconds in one second of this unit.
    fn arcsec_per_second(self) -> Decimal {
        match self {
            AngleUnit::HourAngle => Decimal::from(15),
            AngleUnit::Degree => Decimal::ONE,
        }
    }
}

/// A sky angle, e.g. a right ascension, a declination or an error on one of
/// them.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    unit: AngleUnit,

    /// The signed total number of seconds of `unit`.
    seconds: Decimal,
}

impl Angle {
    /// Read a sexagesimal string like `17:48:05.05` (or `-28:47:37.73`). One
    /// to three fields are accepted, so `12.5` is 12.5 hours (or degrees) and
    /// `12:30` is 12 hours (degrees) and 30 minutes. A leading sign applies to
    /// the whole angle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fitsutils::angle::*;
    /// # fn main() -> Result<(), AngleError> {
    /// let ra = Angle::from_sexagesimal("17:48:05.05", AngleUnit::HourAngle)?;
    /// let same = Angle::from_sexagesimal("17:48:5.0500", AngleUnit::HourAngle)?;
    /// assert_eq!(ra, same);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_sexagesimal(s: &str, unit: AngleUnit) -> Result<Angle, AngleError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AngleError::Empty);
        }
        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let signed = unsigned.len() != trimmed.len();

        let fields: Vec<&str> = unsigned.split(':').collect();
        if fields.len() > 3 {
            return Err(AngleError::WrongFieldCount(s.to_string()));
        }

        // The leading field may only be missing when a sign was given; this is
        // what declinations like "-0.12.34.5" turn into once their separators
        // are fixed.
        let mut seconds = Decimal::ZERO;
        let mut scale = Decimal::from(3600);
        for (i_field, field) in fields.iter().enumerate() {
            let invalid = || AngleError::InvalidField {
                input: s.to_string(),
                field: i_field,
            };
            let value = if field.is_empty() {
                if i_field == 0 && signed && fields.len() > 1 {
                    Decimal::ZERO
                } else {
                    return Err(AngleError::EmptyField {
                        input: s.to_string(),
                        field: i_field,
                    });
                }
            } else {
                parse_unsigned_decimal(field).ok_or_else(invalid)?
            };
            // Minutes and seconds are less than 60.
            if i_field > 0 && value >= Decimal::from(60) {
                return Err(invalid());
            }
            seconds = value
                .checked_mul(scale)
                .and_then(|v| seconds.checked_add(v))
                .ok_or_else(|| AngleError::OutOfRange(s.to_string()))?;
            scale /= Decimal::from(60);
        }

        Angle::from_seconds(if negative { -seconds } else { seconds }, unit)
            .map_err(|_| AngleError::OutOfRange(s.to_string()))
    }

    /// Make an angle from a signed number of seconds of `unit` (seconds of
    /// time for [AngleUnit::HourAngle], arcseconds for [AngleUnit::Degree]).
    /// Unlike sexagesimal fields, `seconds` may be 60 or more.
    pub fn from_seconds(seconds: Decimal, unit: AngleUnit) -> Result<Angle, AngleError> {
        // Every angle must be representable in arcseconds.
        match seconds.checked_mul(unit.arcsec_per_second()) {
            Some(_) => Ok(Angle { unit, seconds }),
            None => Err(AngleError::OutOfRange(seconds.to_string())),
        }
    }

    /// An angle of zero.
    pub fn zero(unit: AngleUnit) -> Angle {
        Angle {
            unit,
            seconds: Decimal::ZERO,
        }
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// The exact value of this angle in arcseconds.
    pub fn arcsec(&self) -> Decimal {
        // Checked when the angle was made.
        self.seconds
            .checked_mul(self.unit.arcsec_per_second())
            .unwrap_or(Decimal::MAX)
    }

    pub fn to_degrees(&self) -> f64 {
        self.arcsec().to_f64().unwrap_or(f64::NAN) / 3600.0
    }

    pub fn to_radians(&self) -> f64 {
        self.to_degrees().to_radians()
    }

    /// Render this angle as sexagesimal text with the given separator. The
    /// whole fields and the integer seconds are padded to two digits; the
    /// fractional seconds carry no trailing zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fitsutils::angle::*;
    /// # fn main() -> Result<(), AngleError> {
    /// let dec = Angle::from_sexagesimal("-28:47:37.730", AngleUnit::Degree)?;
    /// assert_eq!(dec.to_sexagesimal(':'), "-28:47:37.73");
    /// assert_eq!(dec.to_sexagesimal(' '), "-28 47 37.73");
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_sexagesimal(&self, sep: char) -> String {
        let negative = self.seconds < Decimal::ZERO;
        let abs = self.seconds.abs();
        let whole_seconds = abs.trunc();
        let hours = (whole_seconds / Decimal::from(3600)).trunc();
        let minutes = ((whole_seconds - hours * Decimal::from(3600)) / Decimal::from(60)).trunc();
        let secs = (abs - hours * Decimal::from(3600) - minutes * Decimal::from(60)).normalize();

        format!(
            "{sign}{hours:02}{sep}{minutes:02}{sep}{secs_pad}{secs}",
            sign = if negative { "-" } else { "" },
            hours = hours.to_u64().unwrap_or_default(),
            minutes = minutes.to_u64().unwrap_or_default(),
            secs_pad = if secs < Decimal::TEN { "0" } else { "" },
        )
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sexagesimal(':'))
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.arcsec() == other.arcsec()
    }
}

impl Eq for Angle {}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Angle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arcsec().cmp(&other.arcsec())
    }
}

/// Parse a decimal number with an optional leading sign. Only digits and at
/// most one decimal point may follow the sign; exponents and digit
/// separators aren't accepted.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    match s.as_bytes().first() {
        Some(b'-') => parse_unsigned_decimal(&s[1..]).map(|d| -d),
        Some(b'+') => parse_unsigned_decimal(&s[1..]),
        _ => parse_unsigned_decimal(s),
    }
}

/// Parse a field made only of digits and at most one decimal point.
fn parse_unsigned_decimal(field: &str) -> Option<Decimal> {
    let mut num_points = 0;
    let mut num_digits = 0;
    for c in field.chars() {
        match c {
            '0'..='9' => num_digits += 1,
            '.' => num_points += 1,
            _ => return None,
        }
    }
    if num_digits == 0 || num_points > 1 {
        return None;
    }
    field.parse().ok()
}

/// Fix the separators of a declination as printed in fit reports, e.g.
/// `-28.47.37.73`. Every `.` but the last becomes a `:`, and a `-0` prefix on
/// any field collapses to `-`.
///
/// # Examples
///
/// ```
/// # use fitsutils::angle::convert_dec;
/// assert_eq!(convert_dec("-28.47.37.73"), "-28:47:37.73");
/// assert_eq!(convert_dec("-00.12.34.5"), "-0:12:34.5");
/// ```
pub fn convert_dec(dec: &str) -> String {
    let num_points = dec.matches('.').count();
    let mut converted = String::with_capacity(dec.len());
    let mut seen_points = 0;
    for c in dec.chars() {
        if c == '.' {
            seen_points += 1;
            if seen_points < num_points {
                converted.push(':');
                continue;
            }
        }
        converted.push(c);
    }
    converted.replace("-0", "-")
}
