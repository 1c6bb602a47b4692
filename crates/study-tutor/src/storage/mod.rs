//! Storage for materials, generated artifacts, and uploaded files
//!
//! Everything here lives for the process lifetime; there is no
//! persistence across restarts.

mod artifacts;
mod files;
mod materials;

pub use artifacts::{ArtifactCache, CacheStats, CachedNotes};
pub use files::FileStore;
pub use materials::MaterialStore;
