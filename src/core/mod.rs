//! Session consistency engine and the record lifecycle around it.
//!
//! `problems`, `conflicts`, `duplicates`, `merge` and `stats` are pure over
//! `&[Record]`; `store` and `timer` are the mutable edge used by the CLI.

pub mod conflicts;
pub mod duplicates;
pub mod merge;
pub mod problems;
pub mod stats;
pub mod store;
pub mod timer;

pub use conflicts::{count_conflicts, find_conflicts};
pub use duplicates::{IdentityKey, KeyStrategy, find_duplicates, find_duplicates_by};
pub use merge::{
    MergeOutcome, MergePlan, merge_duplicate_group, merge_group, merge_in_store, plan_merge,
};
pub use problems::{count_problem_sessions, detect_session_problems, find_problem_sessions};
pub use store::{MemoryStore, RecordStore};
