//! Banner image cache
//!
//! Serves the banner list from the cache record when one exists. Otherwise
//! fetches the list, downloads every image into the blob store and persists the
//! resulting `{uri, title}` list as the new record. The record is all-or-nothing
//! and is never refreshed automatically.

use crate::blob_store::BlobStore;
use crate::config::Config;
use crate::error::{CacheError, ReaderError, Result};
use crate::models::{CachedImage, ImageDescriptor};
use crate::source::BannerSource;
use crate::store::KeyValueStore;

/// Cache-and-fetch front for the banner carousel
pub struct ImageCache<S> {
    source: BannerSource,
    blobs: BlobStore,
    store: S,
    cache_key: String,
}

impl<S: KeyValueStore> ImageCache<S> {
    pub fn new(
        source: BannerSource,
        blobs: BlobStore,
        store: S,
        cache_key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            blobs,
            store,
            cache_key: cache_key.into(),
        }
    }

    /// Build the source and blob store from `config`, persisting into `store`
    pub fn from_config(config: &Config, store: S) -> Result<Self> {
        Ok(Self::new(
            BannerSource::new(config)?,
            BlobStore::new(config.image_dir()),
            store,
            config.cache_key(),
        ))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Return the cached banner list, fetching it on first use.
    ///
    /// A present record is returned as-is; referenced files are not checked.
    pub async fn load_images(&self) -> std::result::Result<Vec<CachedImage>, CacheError> {
        match self.read_record() {
            Ok(Some(images)) => {
                log::info!("Cache hit for '{}': {} images", self.cache_key, images.len());
                return Ok(images);
            }
            Ok(None) => {
                log::info!("No cache record under '{}', fetching banners", self.cache_key);
            }
            Err(e) => {
                log::error!("Error loading images: {}", e);
                return Err(CacheError::Load(e));
            }
        }

        self.fetch_and_cache_images().await
    }

    /// Fetch the banner list, download every image and overwrite the cache record.
    ///
    /// Fails as a unit: if the list request or any single download fails no
    /// record is written.
    pub async fn fetch_and_cache_images(
        &self,
    ) -> std::result::Result<Vec<CachedImage>, CacheError> {
        self.fetch_and_cache().await.map_err(|e| {
            log::error!("Error fetching images: {}", e);
            CacheError::Fetch(e)
        })
    }

    fn read_record(&self) -> Result<Option<Vec<CachedImage>>> {
        match self.store.get(&self.cache_key)? {
            Some(record) => Ok(Some(serde_json::from_str(&record)?)),
            None => Ok(None),
        }
    }

    async fn fetch_and_cache(&self) -> Result<Vec<CachedImage>> {
        let descriptors = self.source.fetch_descriptors().await?;

        // Each download runs as its own task. On the first failure the join
        // returns early and the remaining tasks are detached, not aborted.
        let downloads = descriptors.into_iter().map(|descriptor| {
            let handle = tokio::spawn(download_to_cache(
                self.source.clone(),
                self.blobs.clone(),
                descriptor,
            ));
            async move {
                handle
                    .await
                    .map_err(ReaderError::from)
                    .and_then(|result| result)
            }
        });
        let images = futures::future::try_join_all(downloads).await?;

        let record = serde_json::to_string(&images)?;
        self.store.set(&self.cache_key, &record)?;

        log::info!("Cached {} banners under '{}'", images.len(), self.cache_key);
        Ok(images)
    }
}

/// Download one banner into the blob store
async fn download_to_cache(
    source: BannerSource,
    blobs: BlobStore,
    descriptor: ImageDescriptor,
) -> Result<CachedImage> {
    let path = blobs.path_for(&descriptor.title)?;
    let bytes = source.download(&descriptor.url).await?;
    let path = blobs.write(&bytes, &path).await?;

    Ok(CachedImage {
        uri: path.to_string_lossy().into_owned(),
        title: descriptor.title,
    })
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
