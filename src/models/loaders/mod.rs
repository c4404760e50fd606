pub mod notebook_loader;
pub mod roster_loader;

pub use notebook_loader::{common_prefix, load_document, load_submissions, LoadedSubmissions};
pub use roster_loader::load_roster;
