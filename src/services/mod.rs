pub mod dedup;
pub mod distance;
pub mod output_writer;
pub mod prompt_builder;
pub mod span_matcher;
pub mod table;
pub mod warn_writer;

pub use output_writer::OutputWriter;
pub use prompt_builder::PromptBuilder;
pub use span_matcher::SpanMatcher;
pub use table::Table;
pub use warn_writer::WarnWriter;
