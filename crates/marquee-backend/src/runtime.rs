//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, the catalog store, and the
//! message dispatch loop that listens to intents from the bridge.

use std::{sync::Arc, thread};

use marquee_bridge::{
    MessageFromBackend, MessageToBackend,
    config::Config,
    notification::NotificationMessage,
};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::services;
use crate::state::State;
use crate::store::Store;

/// Initialize backend state, run the initial fetch, and start processing
/// intents.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let (config, config_error) = match crate::config::load_config().await {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("Failed to load config, using defaults: {e}");
            (Config::default(), Some(e))
        }
    };

    let state = State::new(config, reqwest::Client::new());
    let bundled = state.source.is_bundled();

    let context = Arc::new(AppContext {
        store: Store::new(),
        state: Arc::new(RwLock::new(state)),
        tx,
    });

    if let Some(e) = config_error {
        context
            .send_notification(NotificationMessage::warning(format!(
                "Settings could not be loaded ({e}). Using defaults."
            )))
            .await;
    }

    if bundled {
        log::info!("No provider API key configured, serving the bundled catalog");
        context
            .send_notification(NotificationMessage::info(
                "No TMDB API key configured. Showing the bundled movie list.",
            ))
            .await;
    }

    let changes = context.store.subscribe();
    tokio::spawn(context.clone().forward_snapshots(changes));
    services::catalog_service::handle_fetch_request(context.clone(), false).await;
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
///
/// The catalog is fetched once automatically at startup; later fetches only
/// happen on request.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    })
}
