use super::record::Record;
use serde::Serialize;

/// Records sharing one identity key, suspected to be redundant copies
/// written by concurrent tabs or devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub key: String,
    pub work_name: String,
    pub deal_name: String,
    /// Sorted by date ascending.
    pub records: Vec<Record>,
    pub total_sessions: usize,
    pub total_duration: i64,
    /// A single date, or `"{first} ~ {last}"`.
    pub date_range: String,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record_ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }
}
