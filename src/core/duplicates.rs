//! Duplicate-record detection by identity key.
//!
//! The key is a naming heuristic, not a real identity: two genuinely
//! different tasks with the same work and deal name land in the same group.
//! Callers that know better can plug in their own [`IdentityKey`].

use crate::models::{DuplicateGroup, Record};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub const KEY_SEPARATOR: &str = "||";

/// Maps a record to the key used to group suspected duplicates.
pub trait IdentityKey {
    fn key(&self, record: &Record) -> String;
}

impl<F> IdentityKey for F
where
    F: Fn(&Record) -> String,
{
    fn key(&self, record: &Record) -> String {
        self(record)
    }
}

/// Built-in key strategies, selectable from the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// `work_name||deal_name`
    #[default]
    WorkDeal,
    /// `work_name||deal_name||task_name`
    WorkDealTask,
    /// `work_name||deal_name||date`
    WorkDealDate,
}

impl IdentityKey for KeyStrategy {
    fn key(&self, r: &Record) -> String {
        let base = format!("{}{}{}", r.work_name, KEY_SEPARATOR, r.deal_name);
        match self {
            KeyStrategy::WorkDeal => base,
            KeyStrategy::WorkDealTask => format!("{}{}{}", base, KEY_SEPARATOR, r.task_name),
            KeyStrategy::WorkDealDate => format!("{}{}{}", base, KEY_SEPARATOR, r.date),
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyStrategy::WorkDeal => "work_deal",
            KeyStrategy::WorkDealTask => "work_deal_task",
            KeyStrategy::WorkDealDate => "work_deal_date",
        };
        write!(f, "{}", s)
    }
}

/// Duplicate groups using the default `work_name||deal_name` key.
pub fn find_duplicates(records: &[Record]) -> Vec<DuplicateGroup> {
    find_duplicates_by(records, &KeyStrategy::default())
}

/// Group non-deleted records by `key`; groups with at least two members are
/// returned, largest first. Ties keep first-seen key order.
pub fn find_duplicates_by<K: IdentityKey + ?Sized>(
    records: &[Record],
    key: &K,
) -> Vec<DuplicateGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&Record>> = HashMap::new();

    for record in records.iter().filter(|r| r.is_active()) {
        let k = key.key(record);
        let bucket = buckets.entry(k.clone()).or_default();
        if bucket.is_empty() {
            order.push(k);
        }
        bucket.push(record);
    }

    let mut groups: Vec<DuplicateGroup> = order
        .into_iter()
        .filter_map(|k| {
            let members = buckets.remove(&k)?;
            (members.len() >= 2).then(|| build_group(k, members))
        })
        .collect();

    // stable: equal sizes keep discovery order
    groups.sort_by(|a, b| b.len().cmp(&a.len()));

    debug!("duplicate scan: {} group(s)", groups.len());
    groups
}

fn build_group(key: String, members: Vec<&Record>) -> DuplicateGroup {
    let mut records: Vec<Record> = members.into_iter().cloned().collect();
    records.sort_by(|a, b| a.date.cmp(&b.date));

    let total_sessions = records.iter().map(|r| r.sessions.len()).sum();
    let total_duration = records.iter().map(|r| r.duration_minutes).sum();

    let dates: BTreeSet<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let date_range = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if first != last => format!("{} ~ {}", first, last),
        (Some(only), _) => only.to_string(),
        _ => String::new(),
    };

    DuplicateGroup {
        key,
        work_name: records[0].work_name.clone(),
        deal_name: records[0].deal_name.clone(),
        total_sessions,
        total_duration,
        date_range,
        records,
    }
}

pub fn count_duplicate_groups(records: &[Record]) -> usize {
    find_duplicates(records).len()
}
