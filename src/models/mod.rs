pub mod conflict;
pub mod duplicate;
pub mod problem;
pub mod record;
pub mod session;

pub use conflict::ConflictInfo;
pub use duplicate::DuplicateGroup;
pub use problem::{ProblemKind, SessionProblem};
pub use record::{Record, RecordPatch};
pub use session::Session;
