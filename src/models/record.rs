use super::session::Session;
use serde::{Deserialize, Serialize};

/// A unit of tracked work made of one or more sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub work_name: String,
    #[serde(default)]
    pub deal_name: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub project_code: String,
    #[serde(default)]
    pub duration_minutes: i64,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl Record {
    pub fn new(id: &str, date: &str, work_name: &str, deal_name: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.to_string(),
            work_name: work_name.to_string(),
            deal_name: deal_name.to_string(),
            task_name: String::new(),
            category_name: String::new(),
            project_code: String::new(),
            duration_minutes: 0,
            start_time: String::new(),
            end_time: String::new(),
            sessions: Vec::new(),
            is_completed: false,
            is_deleted: false,
            deleted_at: None,
            completed_at: None,
            note: String::new(),
        }
    }

    /// Builder-style helper used by callers assembling records in memory.
    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self.recompute_totals();
        self
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Sum of the contained sessions' durations.
    pub fn session_minutes(&self) -> i64 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }

    /// Recompute `duration_minutes` and the boundary times from the sessions.
    /// Boundaries are left untouched when there are no sessions.
    pub fn recompute_totals(&mut self) {
        self.duration_minutes = self.session_minutes();

        if let Some(first) = self.sessions.first() {
            self.start_time = first.start_time.clone();
        }
        if let Some(last) = self.sessions.last() {
            self.end_time = last.end_time.clone();
        }
    }

    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(v) = &patch.work_name {
            self.work_name = v.clone();
        }
        if let Some(v) = &patch.deal_name {
            self.deal_name = v.clone();
        }
        if let Some(v) = &patch.task_name {
            self.task_name = v.clone();
        }
        if let Some(v) = &patch.category_name {
            self.category_name = v.clone();
        }
        if let Some(v) = &patch.project_code {
            self.project_code = v.clone();
        }
        if let Some(v) = &patch.note {
            self.note = v.clone();
        }
        if let Some(v) = &patch.date {
            self.date = v.clone();
        }
        if let Some(done) = patch.is_completed {
            self.is_completed = done;
            if !done {
                self.completed_at = None;
            }
        }
        if let Some(v) = &patch.completed_at {
            self.completed_at = Some(v.clone());
        }
        if let Some(sessions) = &patch.sessions {
            self.sessions = sessions.clone();
            self.recompute_totals();
        }
    }
}

/// Partial update for [`Record`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub work_name: Option<String>,
    pub deal_name: Option<String>,
    pub task_name: Option<String>,
    pub category_name: Option<String>,
    pub project_code: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
    pub is_completed: Option<bool>,
    pub completed_at: Option<String>,
    pub sessions: Option<Vec<Session>>,
}
