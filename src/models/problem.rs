use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    MissingTime,
    InvalidTime,
    ZeroDuration,
    FutureTime,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::MissingTime => "missing_time",
            ProblemKind::InvalidTime => "invalid_time",
            ProblemKind::ZeroDuration => "zero_duration",
            ProblemKind::FutureTime => "future_time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProblem {
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub description: String,
}

impl SessionProblem {
    pub fn new(kind: ProblemKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}
