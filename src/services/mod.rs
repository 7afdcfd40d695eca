pub mod prompt_builder;
pub mod report_writer;

pub use prompt_builder::{build_question_prompt, build_summary_prompt, NOT_STATED_SENTINEL};
pub use report_writer::{Report, ReportWriter};
