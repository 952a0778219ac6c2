use wolfden_core::DocumentStore;

/// Holds the shared state accessible by all request handlers.
///
/// Only the store handle is shared; documents themselves are re-read from
/// disk on every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: DocumentStore,
}

impl AppState {
    pub fn new(store: DocumentStore) -> Self {
        AppState { store }
    }
}
