// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carrying "main source" labels from a previously saved table into a freshly
//! extracted one.
//!
//! Reports are re-extracted from scratch on every run, so any labelling done
//! since the last run only survives in the old table. A new source takes the
//! label of an old source (under the same date and band) only if exactly one
//! old source is the same measurement; see
//! [SourceRecord::same_measurement](crate::types::SourceRecord::same_measurement).
//! Sources with no match or with several matches keep whatever label they
//! already had.


use log::{debug, trace};

use crate::types::FitTable;

/// What happened to the sources of a table during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Sources that had exactly one match, and took its label.
    pub carried: usize,

    /// Sources that matched more than one old source.
    pub ambiguous: usize,

    /// Sources without any match.
    pub unmatched: usize,
}

/// Copy the `is_main` labels of `old` into `new`, in place. When `old` is
/// empty, nothing is done.
pub fn merge_fit_tables(new: &mut FitTable, old: &FitTable) -> MergeSummary {
    let mut summary = MergeSummary::default();
    if old.is_empty() {
        debug!("No previous fit table entries; nothing to merge");
        return summary;
    }

    for (date, band, entry) in new.iter_mut() {
        let old_sources = old
            .get(date, band)
            .map(|e| e.sources.as_slice())
            .unwrap_or_default();

        for (i_source, source) in entry.sources.iter_mut().enumerate() {
            let mut matches = old_sources.iter().filter(|o| o.same_measurement(source));
            match (matches.next(), matches.next()) {
                (Some(old_source), None) => {
                    trace!(
                        "{date} {band} source {i_source}: is_main '{}' -> '{}'",
                        source.is_main,
                        old_source.is_main
                    );
                    source.is_main = old_source.is_main;
                    summary.carried += 1;
                }
                (Some(_), Some(_)) => {
                    debug!("{date} {band} source {i_source}: several previous sources match; leaving it alone");
                    summary.ambiguous += 1;
                }
                (None, _) => summary.unmatched += 1,
            }
        }
    }

    summary
}
