pub mod logging;
pub mod text;

pub use text::{count_chars, count_words, truncate, TRUNCATION_MARKER};
