//! Story page state: loading, the banner carousel, or an error with retry.

use crate::cache::ImageCache;
use crate::error::CacheError;
use crate::models::CachedImage;
use crate::store::KeyValueStore;

/// What the story page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum StoryState {
    Loading,
    Ready {
        images: Vec<CachedImage>,
        /// Carousel page currently in view
        current_index: usize,
    },
    Failed {
        message: String,
    },
}

/// Banner carousel driven by an [`ImageCache`]
pub struct StoryPage<S> {
    cache: ImageCache<S>,
    state: StoryState,
}

impl<S: KeyValueStore> StoryPage<S> {
    pub fn new(cache: ImageCache<S>) -> Self {
        Self {
            cache,
            state: StoryState::Loading,
        }
    }

    pub fn state(&self) -> &StoryState {
        &self.state
    }

    pub fn cache(&self) -> &ImageCache<S> {
        &self.cache
    }

    /// Initial load: serve the cache record, or fetch when there is none
    pub async fn open(&mut self) -> &StoryState {
        self.state = StoryState::Loading;
        let result = self.cache.load_images().await;
        self.finish(result)
    }

    /// Re-run the full fetch, regardless of any cache record
    pub async fn retry(&mut self) -> &StoryState {
        self.state = StoryState::Loading;
        let result = self.cache.fetch_and_cache_images().await;
        self.finish(result)
    }

    fn finish(&mut self, result: Result<Vec<CachedImage>, CacheError>) -> &StoryState {
        self.state = match result {
            Ok(images) => StoryState::Ready {
                images,
                current_index: 0,
            },
            Err(e) => StoryState::Failed {
                message: e.user_message(),
            },
        };
        &self.state
    }

    /// Track the carousel page from the horizontal scroll offset.
    ///
    /// One page is `page_width` wide; the index is clamped to the last image.
    pub fn on_scroll(&mut self, offset_x: f32, page_width: f32) {
        if page_width <= 0.0 {
            return;
        }
        let page = (offset_x / page_width).floor().max(0.0) as usize;
        self.show_page(page);
    }

    /// Make `index` the current page, clamped to the last image. Ignored unless ready.
    pub fn show_page(&mut self, index: usize) {
        if let StoryState::Ready {
            images,
            current_index,
        } = &mut self.state
        {
            if !images.is_empty() {
                *current_index = index.min(images.len() - 1);
            }
        }
    }
}
