pub mod align;

pub use align::{align, align_prompts};
