pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod types;

pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use fetcher::ArticleFetcher;
pub use models::DateFormatStyle;
pub use types::{Article, ArticlePage, Author};
