//! Application context and message dispatching utilities.
//!
//! The context owns the catalog store and the shared backend state, and
//! provides helpers for sending responses and notifications back to the
//! presentation layer.

use std::sync::Arc;

use marquee_bridge::{MessageFromBackend, MessageToBackend, notification::NotificationMessage};
use tokio::sync::{
    mpsc::{Receiver, Sender},
    watch,
};

use crate::services;
use crate::state::SharedState;
use crate::store::{SessionState, Store};

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// The catalog session. Only handlers write to it, through actions.
    pub store: Store,
    /// Configuration, HTTP client and catalog source.
    pub state: SharedState,
    /// Outbound channel to the presentation layer.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch intents from the bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Bridge closed, stopping message dispatch");
    }

    /// Dispatches the received intent down to individual service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::FetchCatalog { refresh } => {
                services::catalog_service::handle_fetch_request(self.clone(), refresh).await;
            }
            MessageToBackend::SetCategory(filter) => {
                services::catalog_service::handle_set_category(self.clone(), filter).await;
            }
            MessageToBackend::SetSearch(text) => {
                services::catalog_service::handle_set_search(self.clone(), text).await;
            }
            MessageToBackend::SnapshotRequest => {
                services::catalog_service::handle_snapshot_request(self.clone()).await;
            }
            MessageToBackend::ItemDetailsRequest(id) => {
                services::catalog_service::handle_item_details_request(self.clone(), id).await;
            }
        }
    }

    /// Forwards every new catalog session seen on `changes` to the
    /// presentation layer as a snapshot. Returns once the bridge is closed.
    ///
    /// `changes` must be subscribed before any fetch starts, otherwise the
    /// first busy state can be missed.
    pub async fn forward_snapshots(
        self: Arc<Self>,
        mut changes: watch::Receiver<Arc<SessionState>>,
    ) {
        while changes.changed().await.is_ok() {
            let session = changes.borrow_and_update().clone();
            if !self
                .send(MessageFromBackend::SnapshotUpdate(session.to_snapshot()))
                .await
            {
                break;
            }
        }
    }

    /// Send a message to the presentation layer. Returns `false` when the
    /// receiving side is gone.
    pub async fn send(&self, message: MessageFromBackend) -> bool {
        match self.tx.send(message).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to send message to frontend: {e}");
                false
            }
        }
    }

    /// Send a notification message to the presentation layer.
    pub async fn send_notification(&self, notification: NotificationMessage) {
        self.send(MessageFromBackend::NotificationMessage(notification))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use marquee_bridge::{catalog::CategoryFilter, config::Config};
    use tokio::sync::{RwLock, mpsc};

    use super::*;
    use crate::{state::State, store::Action};

    #[tokio::test]
    async fn changes_published_before_forwarding_starts_are_delivered() {
        let (tx, mut rx) = mpsc::channel(16);
        let context = Arc::new(AppContext {
            store: Store::new(),
            state: Arc::new(RwLock::new(State::new(
                Config::default(),
                reqwest::Client::new(),
            ))),
            tx,
        });

        let changes = context.store.subscribe();
        context.store.begin_fetch(false).await;
        tokio::spawn(context.clone().forward_snapshots(changes));

        let Some(MessageFromBackend::SnapshotUpdate(snapshot)) = rx.recv().await else {
            panic!("expected a snapshot update");
        };
        assert!(snapshot.loading);
        assert_eq!(snapshot.active_category, CategoryFilter::All);

        context
            .store
            .dispatch(Action::SetSearch("nova".to_string()))
            .await;
        let Some(MessageFromBackend::SnapshotUpdate(snapshot)) = rx.recv().await else {
            panic!("expected a snapshot update");
        };
        assert_eq!(snapshot.search_text, "nova");
    }
}
