pub mod entity;
pub mod repository;

pub use entity::{Article, ArticleId, ArticleTitle, ArticleUpdate, NewArticle};
pub use repository::ArticleRepository;
