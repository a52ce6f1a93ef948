//! Server State
//!
//! Shared application state handed to every handler. Everything is behind an
//! `Arc` so cloning the state per-request is cheap.

use std::sync::Arc;

use crate::core::Config;
use crate::notify::{LogSink, NotificationSink, Notifier};
use crate::orders::closing::TableCloser;
use crate::orders::consolidator::BillingConsolidator;
use crate::orders::lifecycle::OrderLifecycle;
use crate::store::{MemoryOrderStore, OrderStore};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn OrderStore>,
    pub lifecycle: Arc<OrderLifecycle>,
    pub consolidator: Arc<BillingConsolidator>,
    pub closer: Arc<TableCloser>,
}

impl ServerState {
    /// Build the full service graph on top of the in-memory store.
    pub fn initialize(config: &Config) -> Self {
        let store: Arc<dyn OrderStore> = Arc::new(MemoryOrderStore::new());
        Self::with_store(config, store, LogSink)
    }

    /// Build the service graph on a caller-provided store and sink.
    pub fn with_store(
        config: &Config,
        store: Arc<dyn OrderStore>,
        sink: impl NotificationSink + 'static,
    ) -> Self {
        let notifier = Notifier::spawn(sink, config.notify_queue_capacity);
        let lifecycle = Arc::new(OrderLifecycle::new(store.clone(), notifier));
        let consolidator = Arc::new(BillingConsolidator::new(store.clone()));
        let closer = Arc::new(TableCloser::new(
            BillingConsolidator::new(store.clone()),
            lifecycle.clone(),
            config.lock_wait(),
        ));

        Self {
            config: Arc::new(config.clone()),
            store,
            lifecycle,
            consolidator,
            closer,
        }
    }
}
