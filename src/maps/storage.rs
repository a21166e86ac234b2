use async_trait::async_trait;
use image::io::Reader as ImageReader;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// File extensions accepted for map uploads
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A map image that has been validated and persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMap {
    pub filename: String, // Generated name, unique per upload
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, strum_macros::AsRefStr)]
pub enum MapStorageError {
    #[error("No file selected")]
    MissingFile,

    #[error("Unsupported file type. Use png/jpg/jpeg/webp.")]
    UnsupportedExtension(String),

    #[error("Could not read image dimensions: {0}")]
    UndecodableImage(String),

    #[error("Storage error: {0}")]
    #[strum(serialize = "StorageIo")]
    Io(#[from] std::io::Error),
}

impl MapStorageError {
    pub fn kind(&self) -> &str {
        self.as_ref()
    }
}

/// Trait for persisting uploaded map images
#[async_trait]
pub trait MapStorage: Send + Sync {
    /// Validates, measures and persists an upload, returning its stored name
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredMap, MapStorageError>;
}

/// Lowercased extension of `filename` if it is on the allow-list
pub fn allowed_extension(filename: &str) -> Option<String> {
    let extension = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Decodes just enough of the image to learn its pixel dimensions
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), MapStorageError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    reader
        .into_dimensions()
        .map_err(|e| MapStorageError::UndecodableImage(e.to_string()))
}

/// Shared validation: returns the generated filename and dimensions
fn prepare(original_name: &str, bytes: &[u8]) -> Result<StoredMap, MapStorageError> {
    if original_name.is_empty() || bytes.is_empty() {
        return Err(MapStorageError::MissingFile);
    }
    let extension = allowed_extension(original_name)
        .ok_or_else(|| MapStorageError::UnsupportedExtension(original_name.to_string()))?;
    let (width, height) = image_dimensions(bytes)?;

    Ok(StoredMap {
        filename: format!("{}.{}", Uuid::new_v4().simple(), extension),
        width,
        height,
    })
}

/// Stores maps as files in an upload directory
pub struct DiskMapStorage {
    upload_dir: PathBuf,
}

impl DiskMapStorage {
    /// Creates the storage, making sure the upload directory exists
    pub fn create(upload_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let upload_dir = upload_dir.into();
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

#[async_trait]
impl MapStorage for DiskMapStorage {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredMap, MapStorageError> {
        let stored = prepare(original_name, bytes).inspect_err(|error| {
            warn!(%error, "Rejected map upload");
        })?;

        let path = self.upload_dir.join(&stored.filename);
        tokio::fs::write(&path, bytes).await?;

        info!(
            filename = %stored.filename,
            width = stored.width,
            height = stored.height,
            "Map stored on disk"
        );
        Ok(stored)
    }
}

/// In-memory implementation of MapStorage for development and testing
#[derive(Default)]
pub struct InMemoryMapStorage {
    maps: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryMapStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.maps.lock().ok()?.get(filename).cloned()
    }

    pub fn len(&self) -> usize {
        self.maps.lock().map(|maps| maps.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MapStorage for InMemoryMapStorage {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredMap, MapStorageError> {
        let stored = prepare(original_name, bytes)?;

        let mut maps = self
            .maps
            .lock()
            .map_err(|_| std::io::Error::other("map store lock poisoned"))?;
        maps.insert(stored.filename.clone(), bytes.to_vec());

        debug!(filename = %stored.filename, "Map stored in memory");
        Ok(stored)
    }
}
