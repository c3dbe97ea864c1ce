//! Raw translation input: documents, flattening and resource loading.

pub mod error;
pub mod loader;
pub mod translation;

pub use error::LoaderError;
pub use loader::{
    FsResourceLoader,
    MemoryResourceLoader,
    ResourceLoader,
    discover_locales,
};
