//! Pairwise overlap detection between sessions of the same date.
//!
//! Every overlapping pair is reported on its own: three mutually overlapping
//! sessions give three conflicts. The scan is O(n²) per date bucket, which is
//! fine for a single user's day but is the scaling limit of this module.

use crate::models::conflict::ConflictSide;
use crate::models::{ConflictInfo, Record, Session};
use crate::utils::time::{do_time_ranges_overlap, overlap_minutes};
use log::debug;
use std::collections::BTreeMap;

struct Entry<'a> {
    record: &'a Record,
    session: &'a Session,
}

impl Entry<'_> {
    fn side(&self) -> ConflictSide {
        ConflictSide {
            record_id: self.record.id.clone(),
            work_name: self.record.work_name.clone(),
            deal_name: self.record.deal_name.clone(),
            session: self.session.clone(),
        }
    }
}

/// All overlapping session pairs across non-deleted records.
///
/// Sessions missing either time (including running ones) are skipped.
/// Results are ordered by date, then by scan position within the date.
pub fn find_conflicts(records: &[Record]) -> Vec<ConflictInfo> {
    let mut by_date: BTreeMap<&str, Vec<Entry>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_active()) {
        for session in record.sessions.iter().filter(|s| s.has_times()) {
            by_date
                .entry(session.effective_date(&record.date))
                .or_default()
                .push(Entry { record, session });
        }
    }

    let mut conflicts = Vec::new();

    for (date, entries) in &by_date {
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (a, b) = (&entries[i], &entries[j]);
                let (ra, rb) = (a.session.range(), b.session.range());

                if do_time_ranges_overlap(ra, rb) {
                    conflicts.push(ConflictInfo {
                        date: date.to_string(),
                        session1: a.side(),
                        session2: b.side(),
                        overlap_minutes: overlap_minutes(ra, rb),
                    });
                }
            }
        }
    }

    debug!(
        "conflict scan: {} date bucket(s), {} conflict(s)",
        by_date.len(),
        conflicts.len()
    );
    conflicts
}

pub fn count_conflicts(records: &[Record]) -> usize {
    find_conflicts(records).len()
}

/// Ids of the records involved in at least one conflict on `date`,
/// in first-seen order. Handy for feeding a conflict into a merge.
pub fn conflict_record_ids(conflicts: &[ConflictInfo], date: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for c in conflicts.iter().filter(|c| c.date == date) {
        for id in [&c.session1.record_id, &c.session2.record_id] {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}
