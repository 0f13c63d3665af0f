// src/save/mod.rs
// =============================================================================
// Persisting pages.
//
// Submodules:
// - path: URL -> relative file path (SavePath)
// - store: the PageStore trait and the atomic-writing FsStore
// =============================================================================

mod path;
mod store;

pub use path::SavePath;
pub use store::{FsStore, PageStore, StoreError};
