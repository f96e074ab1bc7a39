//! Downloaded banner images on disk
//!
//! Images are stored as `<title>.jpg` files in a single cache directory.
//! Path separators in titles are replaced so every file stays inside it.

use crate::error::{ReaderError, Result};
use std::path::{Component, Path, PathBuf};

/// Filesystem store for downloaded image bytes
#[derive(Debug, Clone)]
pub struct BlobStore {
    cache_dir: PathBuf,
}

impl BlobStore {
    /// Create a blob store rooted at `cache_dir`. The directory is created on first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        log::debug!("Image cache directory: {:?}", cache_dir);
        Self { cache_dir }
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Filename for a banner title. Separators and NUL become `_`; two banners
    /// with the same title share a file.
    fn filename(title: &str) -> String {
        let stem: String = title
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                c => c,
            })
            .collect();
        format!("{}.jpg", stem)
    }

    /// Local path a banner with this title is cached at.
    ///
    /// Fails with [`ReaderError::InvalidTitle`] if the result would not be a
    /// direct child of the cache directory.
    pub fn path_for(&self, title: &str) -> Result<PathBuf> {
        let filename = Self::filename(title);
        let mut components = Path::new(&filename).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        let path = self.cache_dir.join(&filename);
        if !single || path.parent() != Some(self.cache_dir.as_path()) {
            return Err(ReaderError::InvalidTitle(title.to_string()));
        }
        Ok(path)
    }

    /// Write bytes to `path`, creating parent directories as needed
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        log::debug!("Cached {} bytes at {}", bytes.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// Read a cached image
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;
    use tempfile::TempDir;

    fn create_test_store() -> (BlobStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = BlobStore::new(temp_dir.path().join("images"));
        (store, temp_dir)
    }

    #[test]
    fn test_filename_format() {
        assert_eq!(BlobStore::filename("a"), "a.jpg");
        assert_eq!(BlobStore::filename("Episode 12"), "Episode 12.jpg");
    }

    #[test]
    fn test_path_construction() {
        let (store, temp_dir) = create_test_store();
        let path = store.path_for("banner").unwrap();

        assert_eq!(path, temp_dir.path().join("images").join("banner.jpg"));
    }

    #[test]
    fn test_filename_replaces_separators() {
        assert_eq!(BlobStore::filename("a/b"), "a_b.jpg");
        assert_eq!(BlobStore::filename("a\\b"), "a_b.jpg");
        assert_eq!(BlobStore::filename("C:x"), "C_x.jpg");
        assert_eq!(BlobStore::filename("nul\0byte"), "nul_byte.jpg");
    }

    #[test]
    fn test_path_stays_in_cache_dir() {
        let (store, _temp_dir) = create_test_store();

        let absolute = store.path_for("/etc/passwd").unwrap();
        assert_eq!(absolute, store.cache_dir().join("_etc_passwd.jpg"));

        for title in ["../../escaped", "..", ".", "", "a/../../b", "\\\\host\\share"] {
            let path = store.path_for(title).unwrap();
            assert_eq!(path.parent(), Some(store.cache_dir()), "title {title:?}");
        }
    }

    #[tokio::test]
    async fn test_write_creates_directory() {
        let (store, _temp_dir) = create_test_store();
        assert!(!store.cache_dir().exists());

        let path = store.path_for("a").unwrap();
        let written = store.write(&[0xFF, 0xD8, 0xFF], &path).await.unwrap();

        assert_eq!(written, path);
        assert!(store.cache_dir().is_dir());
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let (store, _temp_dir) = create_test_store();
        let test_data = vec![0x89, 0x50, 0x4E, 0x47]; // PNG magic bytes

        let path = store.write(&test_data, &store.path_for("a").unwrap()).await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), test_data);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing() {
        let (store, _temp_dir) = create_test_store();
        let path = store.path_for("same").unwrap();

        store.write(&[1, 2, 3], &path).await.unwrap();
        store.write(&[4, 5, 6, 7], &path).await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), vec![4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_read_missing_is_io_error() {
        let (store, _temp_dir) = create_test_store();

        let result = store.read(&store.path_for("missing").unwrap()).await;
        assert!(matches!(result, Err(ReaderError::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_image_data() {
        let (store, _temp_dir) = create_test_store();

        let path = store.write(&[], &store.path_for("empty").unwrap()).await.unwrap();
        assert!(store.read(&path).await.unwrap().is_empty());
    }
}
