//! 报告层
//!
//! 对 `MatchResults` 的只读投影，彼此独立

pub mod merged;
pub mod missing;
pub mod polls;
pub mod tally;

pub use merged::{assemble, MergeOptions};
pub use missing::{missing_answers, MissingEntry};
pub use polls::{poll_tables, PollTable};
pub use tally::answer_counts;
