//! Image reading and thumbnail pipeline components.
//!
//! - **reader**: Probe containers and build reports
//! - **metadata**: Decode EXIF tags into a metadata record
//! - **hash**: BLAKE3 content hashes
//! - **geometry**: Plan resample size and rotation for a thumbnail
//! - **raster**: Pixel operations behind a swappable backend
//! - **thumbnail**: Concurrency-bounded thumbnail generation
//! - **discovery**: Find image files in directories

pub mod discovery;
pub mod geometry;
pub mod hash;
pub mod metadata;
pub mod raster;
pub mod reader;
pub mod thumbnail;

// Re-exports for convenient access
pub use discovery::FileDiscovery;
pub use geometry::{AffineTransform, ThumbnailPlan};
pub use hash::Hasher;
pub use metadata::MetadataExtractor;
pub use raster::{ImageCrateBackend, RasterBackend};
pub use reader::{ContainerInfo, ImageReader};
pub use thumbnail::ThumbnailGenerator;
