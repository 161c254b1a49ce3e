//! Record source: reads exported access-log CSV files
//!
//! Expected header (order does not matter, extra columns are ignored):
//! `time, client_ip, target_processing_time, target_status_code, request_verb,
//! request_url, request_proto, user_agent, target_group_arn, domain_name`

use crate::record::{DataFormatError, RawLogRow, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read every row of an access-log CSV into untyped rows
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawLogRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<RawLogRow>() {
        rows.push(row?);
    }

    tracing::debug!("read {} access-log rows", rows.len());
    Ok(rows)
}

/// Open `path` and read it with [`read_csv`]
pub fn load_csv(path: &Path) -> Result<Vec<RawLogRow>> {
    let file = File::open(path).map_err(|source| DataFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("loading access log from {}", path.display());
    read_csv(file)
}
