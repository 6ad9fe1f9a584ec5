pub mod config;
pub mod errors;
pub mod frontier;
pub mod html;
pub mod query;
pub mod ranking;
pub mod store;
pub mod text;
pub mod tokenizer;
pub mod url_value;

pub use config::{Config, DatabaseConfig, HttpServerConfig, SpiderConfig};
pub use errors::{ConfigError, NetworkError, ParseError, StorageError, ValidationError};
pub use frontier::{Frontier, FrontierItem};
pub use query::SearchQueryValue;
pub use ranking::{rank, SearchResult};
pub use store::{Document, IndexStore, PostgresIndexStore};
pub use text::TextNormalizer;
pub use url_value::UrlValue;
