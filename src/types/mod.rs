// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types describing fitted sources, keyed by observation date and band.


use std::collections::{btree_map, BTreeMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::angle::Angle;

/// Whether a source is the primary target of its observation. This is an
/// annotation made by a person (or carried forward from a previous table);
/// the report parser always leaves it as [IsMain::Unknown].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum IsMain {
    /// Not yet determined.
    #[default]
    #[strum(serialize = "")]
    Unknown,

    #[strum(serialize = "0")]
    NotMain,

    #[strum(serialize = "1")]
    Main,
}

/// The astrometry and flux density of one fitted source. Fields are `None`
/// when the report didn't provide them.
///
/// Fluxes are in mJy. Positional errors are angles in the same unit as the
/// position they belong to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecord {
    pub ra: Option<Angle>,
    pub ra_err: Option<Angle>,
    pub dec: Option<Angle>,
    pub dec_err: Option<Angle>,
    pub flux: Option<Decimal>,
    pub flux_err: Option<Decimal>,
    pub is_main: IsMain,
}

impl SourceRecord {
    /// Are these two records the same measurement? All fields but `is_main`
    /// are compared. A field present on only one of the records means they
    /// are different; absence doesn't match anything but absence.
    pub fn same_measurement(&self, other: &SourceRecord) -> bool {
        let SourceRecord {
            ra,
            ra_err,
            dec,
            dec_err,
            flux,
            flux_err,
            is_main: _,
        } = self;
        *ra == other.ra
            && *ra_err == other.ra_err
            && *dec == other.dec
            && *dec_err == other.dec_err
            && *flux == other.flux
            && *flux_err == other.flux_err
    }
}

/// Clean-beam geometry and observing frequency of one observation. These are
/// kept as the text of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandRecord {
    /// \[GHz\]
    pub freq: Option<String>,
    /// Clean-beam major axis \[arcsec\]
    pub major: Option<String>,
    /// Clean-beam minor axis \[arcsec\]
    pub minor: Option<String>,
}

/// Everything fitted for one (date, band) observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationEntry {
    pub data: BandRecord,

    /// Sources in the order they were reported. Positions in this list are
    /// meaningful; labelling refers to sources by index.
    pub sources: Vec<SourceRecord>,
}

/// All observations, keyed by date and then by band name (e.g. "Lband").
/// Iteration is ordered by date, then band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitTable {
    dates: BTreeMap<NaiveDate, BTreeMap<String, ObservationEntry>>,
}

impl FitTable {
    pub fn new() -> FitTable {
        FitTable::default()
    }

    /// Is there no observation in this table?
    pub fn is_empty(&self) -> bool {
        self.dates.values().all(|bands| bands.is_empty())
    }

    /// The number of (date, band) entries.
    pub fn len(&self) -> usize {
        self.dates.values().map(|bands| bands.len()).sum()
    }

    /// The total number of sources over all entries.
    pub fn num_sources(&self) -> usize {
        self.iter().map(|(_, _, entry)| entry.sources.len()).sum()
    }

    pub fn get(&self, date: NaiveDate, band: &str) -> Option<&ObservationEntry> {
        self.dates.get(&date).and_then(|bands| bands.get(band))
    }

    pub fn get_mut(&mut self, date: NaiveDate, band: &str) -> Option<&mut ObservationEntry> {
        self.dates.get_mut(&date).and_then(|bands| bands.get_mut(band))
    }

    /// Get the entry for this date and band, creating an empty one if it
    /// doesn't exist.
    pub fn entry_mut(&mut self, date: NaiveDate, band: &str) -> &mut ObservationEntry {
        self.dates
            .entry(date)
            .or_default()
            .entry(band.to_string())
            .or_default()
    }

    /// Insert an entry, returning the one that was replaced, if any.
    pub fn insert(
        &mut self,
        date: NaiveDate,
        band: String,
        entry: ObservationEntry,
    ) -> Option<ObservationEntry> {
        self.dates.entry(date).or_default().insert(band, entry)
    }

    /// Iterate over all entries, ordered by date and then band.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str, &ObservationEntry)> {
        self.dates.iter().flat_map(|(&date, bands)| {
            bands
                .iter()
                .map(move |(band, entry)| (date, band.as_str(), entry))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NaiveDate, &str, &mut ObservationEntry)> {
        self.dates.iter_mut().flat_map(|(&date, bands)| {
            bands
                .iter_mut()
                .map(move |(band, entry)| (date, band.as_str(), entry))
        })
    }

    /// Iterate over the entries of a single band, ordered by date.
    pub fn band(&self, band: &str) -> impl Iterator<Item = (NaiveDate, &ObservationEntry)> + '_ {
        let band = band.to_string();
        self.dates
            .iter()
            .filter_map(move |(&date, bands)| bands.get(&band).map(|entry| (date, entry)))
    }

    /// All of the band names used in this table, without duplicates.
    pub fn bands(&self) -> Vec<&str> {
        let mut bands: Vec<&str> = self
            .dates
            .values()
            .flat_map(|bands| bands.keys().map(|b| b.as_str()))
            .collect();
        bands.sort_unstable();
        bands.dedup();
        bands
    }
}

impl<'a> IntoIterator for &'a FitTable {
    type Item = (&'a NaiveDate, &'a BTreeMap<String, ObservationEntry>);
    type IntoIter = btree_map::Iter<'a, NaiveDate, BTreeMap<String, ObservationEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
