pub mod article_loader;

pub use article_loader::load_article;
