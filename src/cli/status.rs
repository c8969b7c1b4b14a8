// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Summarise a fit table and what's left to label in it.

use std::borrow::Cow;

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::common::{InfoPrinter, TableArgs};
use crate::{
    label::LabelError,
    report::DATE_FORMAT,
    types::{FitTable, IsMain},
    FitsUtilsError,
};

/// Verify that a fit table can be read, and print out what's in it.
#[derive(Parser, Debug, Clone, Default)]
pub(super) struct StatusArgs {
    #[clap(flatten)]
    table_args: TableArgs,
}

impl StatusArgs {
    pub(super) fn run(self) -> Result<(), FitsUtilsError> {
        let path = match self.table_args.table {
            Some(p) => p,
            None => return Err(FitsUtilsError::Table("No fit table was specified".to_string())),
        };
        let table = FitTable::read_file(&path)?;
        let (summary, problems) = summarise(&table);

        let mut printer = InfoPrinter::new(format!("Fit table {}", path.display()).into());
        for block in summary {
            printer.push_block(block);
        }
        printer.display();
        if problems.is_empty() {
            info!("Every observation has exactly one main source");
        } else {
            let mut printer = InfoPrinter::new("Observations without a usable main source".into());
            for line in problems {
                printer.push_line(line);
            }
            printer.display();
        }

        Ok(())
    }
}

/// Describe a table, returning blocks of general information and one line for
/// each observation that doesn't have exactly one main source.
fn summarise(table: &FitTable) -> (Vec<Vec<Cow<'static, str>>>, Vec<Cow<'static, str>>) {
    let mut summary: Vec<Vec<Cow<'static, str>>> = vec![vec![format!(
        "{} observations, {} sources",
        table.len(),
        table.num_sources()
    )
    .into()]];
    for band in table.bands() {
        let dates = table.band(band).map(|(date, _)| date).collect::<Vec<_>>();
        let (first, last) = match (dates.first(), dates.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => continue,
        };
        summary.push(vec![
            format!("{band}: {} observations", dates.len()).into(),
            format!(
                "  {} to {}",
                first.format(DATE_FORMAT),
                last.format(DATE_FORMAT)
            )
            .into(),
        ]);
    }

    let problems = table
        .iter()
        .filter(|(_, _, entry)| !entry.sources.is_empty())
        .filter_map(|(date, band, entry)| {
            let key = format!("{} {band}", date.format(DATE_FORMAT));
            match entry.main_source() {
                Ok(_) => None,
                Err(LabelError::NoMainSource) => {
                    let num_unknown = entry
                        .sources
                        .iter()
                        .filter(|s| s.is_main == IsMain::Unknown)
                        .count();
                    if num_unknown > 0 {
                        Some(format!("{key}: {num_unknown} unlabelled sources"))
                    } else {
                        Some(format!("{key}: no main source"))
                    }
                }
                Err(e) => Some(format!("{key}: {e}")),
            }
        })
        .map(Cow::from)
        .collect_vec();

    (summary, problems)
}
