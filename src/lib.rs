//! Webtoon Reader - banner carousel with a local image cache
//!
//! Fetches the banner list once, downloads every image into a local cache
//! directory and remembers the result in a key-value store, so later launches
//! render without touching the network.

pub mod blob_store;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod store;
pub mod story;

pub use blob_store::BlobStore;
pub use cache::ImageCache;
pub use config::Config;
pub use error::{CacheError, ReaderError, Result};
pub use models::{CachedImage, ImageDescriptor, ImageLocation};
pub use source::BannerSource;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use story::{StoryPage, StoryState};
