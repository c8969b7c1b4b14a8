// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Labelling which source of an observation is the main one.
//!
//! Sources are referred to by their 0-based position in their entry. Giving
//! one source the main label gives every other source in the same entry the
//! "not main" label.

mod error;
mod prompt;

pub use error::LabelError;
pub use prompt::{prompt_for_main_source, Answer};

use crate::types::{IsMain, ObservationEntry, SourceRecord};

impl ObservationEntry {
    /// Make the source at `index` the main source of this entry.
    pub fn set_main_source(&mut self, index: usize) -> Result<(), LabelError> {
        if index >= self.sources.len() {
            return Err(LabelError::IndexOutOfRange {
                index,
                num_sources: self.sources.len(),
            });
        }
        for (i, source) in self.sources.iter_mut().enumerate() {
            source.is_main = if i == index {
                IsMain::Main
            } else {
                IsMain::NotMain
            };
        }
        Ok(())
    }

    /// Does any source still have an unknown label?
    pub fn needs_labelling(&self) -> bool {
        self.sources.iter().any(|s| s.is_main == IsMain::Unknown)
    }

    /// Get the main source, along with its index. Exactly one source must be
    /// labelled as main.
    pub fn main_source(&self) -> Result<(usize, &SourceRecord), LabelError> {
        let mut mains = self
            .sources
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_main == IsMain::Main);
        match (mains.next(), mains.next()) {
            (Some(main), None) => Ok(main),
            (None, _) => Err(LabelError::NoMainSource),
            (Some(_), Some(_)) => Err(LabelError::SeveralMainSources(2 + mains.count())),
        }
    }
}
