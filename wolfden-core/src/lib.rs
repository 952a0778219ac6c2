pub mod collection;
pub mod config;
pub mod error;
pub mod json;
pub mod store;


// Re-export key types for easier use
pub use collection::Collection;
pub use config::ConfigDocument;
pub use error::{StoreError, StoreResult};
pub use store::DocumentStore;
