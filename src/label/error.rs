// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Can't use source {index} as the main source; there are only {num_sources} sources (the first is 0)")]
    IndexOutOfRange { index: usize, num_sources: usize },

    #[error("No source is labelled as the main source")]
    NoMainSource,

    #[error("{0} sources are labelled as the main source; only one may be")]
    SeveralMainSources(usize),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
