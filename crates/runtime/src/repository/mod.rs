//! Document repositories.
//!
//! Flows read actors and items through [`DocumentStore`] and commit changes
//! only through its update operations.

mod error;
mod memory;
mod traits;

pub use error::{DocumentError, Result};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
