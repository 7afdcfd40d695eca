pub mod article;
pub mod loaders;
pub mod notes;

pub use article::Article;
pub use loaders::load_article;
pub use notes::{QaEntry, QaLog, SummaryEntry, SummarySet, Temperature};
