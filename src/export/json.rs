use crate::errors::AppResult;
use crate::models::Record;
use std::fs;
use std::path::Path;

/// Pretty JSON array of records, sessions nested.
pub fn write_json(path: &Path, records: &[Record]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a JSON array of records (the `write_json` layout).
pub fn read_json(path: &Path) -> AppResult<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
