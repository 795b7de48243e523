//! # formant-store
//!
//! Schema persistence for Formant.
//!
//! The evaluation engine in `formant-core` never touches storage; this
//! crate is the collaborator that does. It defines the [`SchemaStore`]
//! contract and two backends:
//!
//! - [`JsonFileStore`]: every saved schema in one JSON file
//! - [`MemoryStore`]: ephemeral, for tests and embedding
//!
//! ## Example
//!
//! ```rust,ignore
//! use formant_store::{JsonFileStore, SchemaStore};
//!
//! let store = JsonFileStore::new("forms.json");
//! store.upsert(schema)?;
//! for schema in store.list()? {
//!     println!("{} ({})", schema.name, schema.id);
//! }
//! ```

mod file;
mod memory;
mod store;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{SchemaStore, StoreError};
