use super::session::Session;
use serde::Serialize;

/// A pair of sessions whose intervals overlap on the same date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictInfo {
    pub date: String,
    pub session1: ConflictSide,
    pub session2: ConflictSide,
    pub overlap_minutes: i64,
}

/// One side of a conflict: the session plus the record that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSide {
    pub record_id: String,
    pub work_name: String,
    pub deal_name: String,
    pub session: Session,
}
