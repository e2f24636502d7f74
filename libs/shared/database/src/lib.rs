pub mod memory;
pub mod rest;
pub mod state;
pub mod store;

pub use memory::InMemoryStore;
pub use rest::RestDocumentStore;
pub use state::AppState;
pub use store::{from_document, to_document, Document, DocumentStore, SortBy, SortDirection, StoreError};
