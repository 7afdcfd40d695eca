pub mod qa_flow;
pub mod summary_flow;

pub use qa_flow::{is_exit_token, QaFlow, QaOutcome};
pub use summary_flow::SummaryFlow;
