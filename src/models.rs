//! Banner descriptors and cached image entries

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image descriptor as returned by the banners endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    /// Display label, also used as the cached filename stem
    pub title: String,
}

/// Entry in the cache record, ready for display.
///
/// `uri` is a local file path once the image has been cached, or a remote URL
/// otherwise. Use [`CachedImage::location`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedImage {
    pub uri: String,
    pub title: String,
}

/// Where a [`CachedImage`] points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    /// Downloaded file on disk
    Local(PathBuf),
    /// Remote http(s) URL, not cached
    Remote(url::Url),
}

impl CachedImage {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Classify `uri` as a remote URL or a local path
    pub fn location(&self) -> ImageLocation {
        match url::Url::parse(&self.uri) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                ImageLocation::Remote(url)
            }
            _ => ImageLocation::Local(PathBuf::from(&self.uri)),
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.location(), ImageLocation::Local(_))
    }
}
