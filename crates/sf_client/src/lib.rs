pub mod http;
pub mod images;
pub mod logging;

pub use http::HttpArticleFetcher;
pub use images::{ImageData, ImageLoader};
pub use logging::{init_logging, Logger};

pub mod prelude {
    pub use super::http::HttpArticleFetcher;
    pub use super::images::ImageLoader;
    pub use sf_core::{Article, ArticleFetcher, ArticlePage, ClientConfig, Error, Result};
}
