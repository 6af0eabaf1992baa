//! Deterministic reduction of a duplicate or conflict group into one record.
//!
//! The earliest record (by date, then start time) survives as the base.
//! Its metadata wins; values from the other records that differ from the
//! base are reported in [`MergeOutcome::dropped_metadata`] instead of being
//! lost silently. Non-base records are soft-deleted, never purged.

use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{DuplicateGroup, Record, Session};
use crate::utils::time::time_to_minutes;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// Result of planning a merge, before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    pub merged: Record,
    pub to_delete: Vec<String>,
    pub dropped_metadata: Vec<DroppedField>,
}

/// A non-base metadata value that differs from the surviving record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedField {
    pub record_id: String,
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub merged_id: String,
    pub deleted_ids: Vec<String>,
    pub session_count: usize,
    pub duration_minutes: i64,
    pub dropped_metadata: Vec<DroppedField>,
}

/// Plan the merge of `group`. Returns `None` for an empty group.
pub fn plan_merge(group: &[Record]) -> Option<MergePlan> {
    let mut ordered: Vec<&Record> = group.iter().collect();
    ordered.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| time_to_minutes(&a.start_time).cmp(&time_to_minutes(&b.start_time)))
    });

    let (base, others) = ordered.split_first()?;

    if others.is_empty() {
        return Some(MergePlan {
            merged: (*base).clone(),
            to_delete: Vec::new(),
            dropped_metadata: Vec::new(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut sessions: Vec<Session> = Vec::new();
    for (i, record) in ordered.iter().enumerate() {
        for s in &record.sessions {
            if seen.insert(s.id.as_str()) {
                let mut s = s.clone();
                // an undated session keeps the day of the record it came from
                if i > 0 {
                    s.date.get_or_insert_with(|| record.date.clone());
                }
                sessions.push(s);
            }
        }
    }

    // Only the base record's undated sessions remain; they sort under its date.
    sessions.sort_by(|a, b| {
        a.effective_date(&base.date)
            .cmp(b.effective_date(&base.date))
            .then_with(|| time_to_minutes(&a.start_time).cmp(&time_to_minutes(&b.start_time)))
    });

    let mut merged = (*base).clone();
    merged.duration_minutes = sessions.iter().map(|s| s.duration_minutes).sum();

    if let Some(first) = sessions.first() {
        merged.start_time = first.start_time.clone();
        merged.date = first.effective_date(&base.date).to_string();
    }
    if let Some(last) = sessions.last() {
        merged.end_time = last.end_time.clone();
    }

    // Sessions that inherited the base date keep it even if the record date moves.
    if merged.date != base.date {
        for s in sessions.iter_mut().filter(|s| s.date.is_none()) {
            s.date = Some(base.date.clone());
        }
    }
    merged.sessions = sessions;

    let dropped_metadata = others
        .iter()
        .flat_map(|other| diverging_fields(base, other))
        .collect();

    Some(MergePlan {
        merged,
        to_delete: others.iter().map(|r| r.id.clone()).collect(),
        dropped_metadata,
    })
}

fn diverging_fields(base: &Record, other: &Record) -> Vec<DroppedField> {
    let fields: [(&'static str, &str, &str); 4] = [
        ("task_name", &base.task_name, &other.task_name),
        ("category_name", &base.category_name, &other.category_name),
        ("project_code", &base.project_code, &other.project_code),
        ("note", &base.note, &other.note),
    ];

    fields
        .into_iter()
        .filter(|(_, b, o)| !o.is_empty() && b != o)
        .map(|(field, _, o)| DroppedField {
            record_id: other.id.clone(),
            field,
            value: o.to_string(),
        })
        .collect()
}

/// Merge the records named by `ids` inside `records`.
///
/// Soft-deleted records are not eligible. If any id cannot be resolved the
/// collection is left untouched and [`AppError::MergeGroupNotFound`] lists
/// the missing ids. `now` is stamped into `deleted_at` of the merged-away records.
pub fn merge_group(records: &mut [Record], ids: &[String], now: &str) -> AppResult<MergeOutcome> {
    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !records.iter().any(|r| r.is_active() && &r.id == *id))
        .cloned()
        .collect();

    if ids.is_empty() || !missing.is_empty() {
        return Err(AppError::MergeGroupNotFound(missing));
    }

    let group: Vec<Record> = records
        .iter()
        .filter(|r| r.is_active() && ids.contains(&r.id))
        .cloned()
        .collect();

    let plan = plan_merge(&group).ok_or_else(|| AppError::MergeGroupNotFound(ids.to_vec()))?;
    let outcome = apply_plan(records, &plan, now);

    info!(
        "merged {} record(s) into {} ({} session(s), {} min)",
        outcome.deleted_ids.len() + 1,
        outcome.merged_id,
        outcome.session_count,
        outcome.duration_minutes
    );
    Ok(outcome)
}

/// Merge the live records of a [`DuplicateGroup`].
pub fn merge_duplicate_group(
    records: &mut [Record],
    group: &DuplicateGroup,
    now: &str,
) -> AppResult<MergeOutcome> {
    merge_group(records, &group.record_ids(), now)
}

/// Write a plan into the collection: replace the base, soft-delete the rest.
pub fn apply_plan(records: &mut [Record], plan: &MergePlan, now: &str) -> MergeOutcome {
    for r in records.iter_mut() {
        if r.id == plan.merged.id && r.is_active() {
            *r = plan.merged.clone();
        } else if plan.to_delete.contains(&r.id) && r.is_active() {
            r.is_deleted = true;
            r.deleted_at = Some(now.to_string());
            debug!("soft-deleted {} after merge", r.id);
        }
    }

    MergeOutcome {
        merged_id: plan.merged.id.clone(),
        deleted_ids: plan.to_delete.clone(),
        session_count: plan.merged.sessions.len(),
        duration_minutes: plan.merged.duration_minutes,
        dropped_metadata: plan.dropped_metadata.clone(),
    }
}

/// Merge the records named by `ids` inside `store` and persist the result.
///
/// A running timer on a merged-away record follows its session into the
/// surviving record, so the next stop closes the live copy.
pub fn merge_in_store<S: RecordStore + ?Sized>(
    store: &mut S,
    ids: &[String],
    now: &str,
) -> AppResult<MergeOutcome> {
    let mut records = store.read_all()?;
    let outcome = merge_group(&mut records, ids, now)?;

    let touched: Vec<Record> = records
        .into_iter()
        .filter(|r| r.id == outcome.merged_id || outcome.deleted_ids.contains(&r.id))
        .collect();
    store.save_records(&touched)?;

    if let Some((rid, sid)) = store.active_session()?
        && outcome.deleted_ids.contains(&rid)
    {
        let survivor_has_it = touched
            .iter()
            .any(|r| r.id == outcome.merged_id && r.sessions.iter().any(|s| s.id == sid));
        if survivor_has_it {
            store.set_active_session(Some((outcome.merged_id.as_str(), sid.as_str())))?;
            info!("running timer {} moved to {}", sid, outcome.merged_id);
        } else {
            store.set_active_session(None)?;
        }
    }

    store.audit(
        "merge",
        &outcome.merged_id,
        &format!(
            "absorbed {} ({} session(s))",
            outcome.deleted_ids.join(","),
            outcome.session_count
        ),
    )?;
    Ok(outcome)
}
