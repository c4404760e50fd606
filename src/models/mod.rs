pub mod loaders;
pub mod notebook;
pub mod outcome;
pub mod prompt;
pub mod roster;
pub mod submission;

pub use loaders::{load_document, load_roster, load_submissions, LoadedSubmissions};
pub use notebook::{Block, BlockKind, BlockMetadata, Document};
pub use outcome::{MatchResults, MatchStatus, Owner, PromptMatch, Span};
pub use prompt::{Prompt, StopText};
pub use roster::Roster;
pub use submission::Submission;
