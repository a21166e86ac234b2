// Public API - what other modules can use
pub use storage::{
    allowed_extension, image_dimensions, DiskMapStorage, InMemoryMapStorage, MapStorage,
    MapStorageError, StoredMap, ALLOWED_EXTENSIONS,
};

// Internal modules
pub mod storage;
