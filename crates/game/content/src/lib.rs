//! Data-driven world content and loaders.
//!
//! Actors and items are described in RON catalogs and loaded straight into
//! `game-core` document types. Content seeds the document store and never
//! appears in flow state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, WorldCatalog, WorldLoader};
