use std::sync::Arc;

use crate::store::QuoteStore;

/// Shared application state, cloned into every handler. The store
/// handle is constructed once at startup and injected here instead of
/// living in a process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: QuoteStore,
}

impl AppState {
    pub fn new(store: QuoteStore) -> Self {
        Self {
            inner: Arc::new(InnerState { store }),
        }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.inner.store
    }
}
