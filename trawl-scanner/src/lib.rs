pub mod agent;
pub mod cache;
pub mod crawler;
pub mod error;
pub mod links;
pub mod result;

pub use agent::UserAgent;
pub use cache::ResponseCache;
pub use crawler::{
    Crawler, CrawlerBuilder, EngineConfig, ErrorCallback, LinkCallback, RequestCallback,
    ResponseCallback,
};
pub use error::ScanError;
pub use result::{DiscoveredLink, FetchedResponse, LinkSource};
