//! Bulk loading of the three CSV sources.
//!
//! Loading is all-or-nothing: an unreadable or unparseable source file is
//! fatal and no partial catalog is ever produced. Individual undecodable rows
//! are absorbed with a warn, matching the row-level failure policy of the
//! assembler.

use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;

use crate::{
    assemble::assemble,
    catalog::PlayCatalog,
    error::{PlayscopeError, PlayscopeResult},
    record::{SourceTable, SupplementaryRow, TrackingRow},
};

/// Reads and assembles the full catalog from the three source files.
#[tracing::instrument(skip_all, fields(
    input = %input_path.as_ref().display(),
    output = %output_path.as_ref().display(),
    supplementary = %supplementary_path.as_ref().display(),
))]
pub fn load_catalog(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    supplementary_path: impl AsRef<Path>,
) -> PlayscopeResult<PlayCatalog> {
    let input: Vec<TrackingRow> = read_table(input_path.as_ref(), SourceTable::Input)?;
    let output: Vec<TrackingRow> = read_table(output_path.as_ref(), SourceTable::Output)?;
    let supplementary: Vec<SupplementaryRow> =
        read_table(supplementary_path.as_ref(), SourceTable::Supplementary)?;

    Ok(PlayCatalog::new(assemble(input, output, supplementary)))
}

fn read_table<T: DeserializeOwned>(path: &Path, table: SourceTable) -> PlayscopeResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| {
            format!(
                "failed to open {} table '{}'",
                table.as_str(),
                path.display()
            )
        })
        .map_err(|e| PlayscopeError::load(format!("{e:#}")))?;

    let mut rows = Vec::new();
    let mut bad_rows = 0usize;
    for record in reader.deserialize::<T>() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                bad_rows += 1;
                tracing::warn!(table = table.as_str(), %err, "dropping undecodable row");
            }
        }
    }

    if bad_rows > 0 {
        tracing::warn!(
            table = table.as_str(),
            bad_rows,
            kept = rows.len(),
            "some rows could not be decoded"
        );
    }

    tracing::debug!(table = table.as_str(), rows = rows.len(), "table loaded");
    Ok(rows)
}
