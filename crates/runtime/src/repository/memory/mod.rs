//! In-memory repository implementations for tests and local runs.

mod documents;

pub use documents::InMemoryDocumentStore;
