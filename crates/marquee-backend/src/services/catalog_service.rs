use marquee_bridge::{
    MessageFromBackend,
    catalog::{CategoryFilter, ItemId},
    config::FetchDelays,
};

use crate::{
    details::item_details,
    source::CatalogSource,
    store::{Action, FetchCommit, Store},
};

/// Message stored in the session when a fetch fails. The underlying cause is
/// only logged.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load movies. Please try again.";

/// Runs one fetch cycle against `store`.
///
/// Raises the busy flag matching `is_refresh`, waits the configured delay,
/// loads the whole catalog from `source` and commits it. On failure the
/// previous items are kept and only the error message is set. The result of
/// a cycle that was superseded by a newer one is dropped.
pub async fn fetch_catalog(
    store: &Store,
    source: &CatalogSource,
    delays: &FetchDelays,
    is_refresh: bool,
) -> FetchCommit {
    let ticket = store.begin_fetch(is_refresh).await;
    log::info!(
        "Fetching catalog ({}) from {}",
        if is_refresh { "refresh" } else { "initial load" },
        if source.is_bundled() { "bundled dataset" } else { "provider" },
    );

    tokio::time::sleep(delays.for_fetch(is_refresh)).await;

    let result = match source.load_catalog().await {
        Ok(items) => {
            log::info!("Fetched {} catalog items", items.len());
            Ok(items)
        }
        Err(e) => {
            log::error!("Catalog fetch failed: {e}");
            Err(FETCH_ERROR_MESSAGE.to_string())
        }
    };

    let commit = store.finish_fetch(ticket, result).await;
    if commit == FetchCommit::Superseded {
        log::debug!("Discarding result of a superseded catalog fetch");
    }
    commit
}

/// Handles a fetch or refresh request (see
/// [`marquee_bridge::MessageToBackend::FetchCatalog`]). The fetch runs in its
/// own task so that other intents keep being processed meanwhile.
pub async fn handle_fetch_request(context: super::AppContextHandle, refresh: bool) {
    let (source, delays) = {
        let state = context.state.read().await;
        (state.source.clone(), state.config.fetch_delays.clone())
    };

    tokio::spawn(async move {
        fetch_catalog(&context.store, &source, &delays, refresh).await;
    });
}

pub async fn handle_set_category(context: super::AppContextHandle, filter: CategoryFilter) {
    context.store.dispatch(Action::SetCategory(filter)).await;
}

pub async fn handle_set_search(context: super::AppContextHandle, text: String) {
    context.store.dispatch(Action::SetSearch(text)).await;
}

/// Sends the current snapshot, whether or not anything changed.
pub async fn handle_snapshot_request(context: super::AppContextHandle) {
    let session = context.store.snapshot().await;
    context
        .send(MessageFromBackend::SnapshotUpdate(session.to_snapshot()))
        .await;
}

/// Handles an item details request (see
/// [`marquee_bridge::MessageToBackend::ItemDetailsRequest`]).
pub async fn handle_item_details_request(context: super::AppContextHandle, id: ItemId) {
    let session = context.store.snapshot().await;
    let details = session.find_item(id).map(item_details);
    if details.is_none() {
        log::warn!("Item {id} is not part of the current catalog");
    }
    context
        .send(MessageFromBackend::ItemDetailsResponse(id, details))
        .await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use marquee_bridge::{
        catalog::Category,
        config::{Config, FetchDelays},
    };
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::{RwLock, mpsc};

    use super::*;
    use crate::{
        app::AppContext,
        fallback::fallback_catalog,
        source::tests::provider_config,
        state::State,
        store::tests::movie,
    };

    fn source_for(base_url: &str, api_key: &str) -> CatalogSource {
        CatalogSource::from_config(&provider_config(base_url, api_key), reqwest::Client::new())
    }

    #[tokio::test]
    async fn empty_credential_serves_fallback_without_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let store = Store::new();
        let commit = fetch_catalog(&store, &source_for(&server.url(), ""), &FetchDelays::NONE, false).await;

        let session = store.snapshot().await;
        assert_eq!(commit, FetchCommit::Committed);
        assert_eq!(session.items.to_vec(), fallback_catalog());
        assert_eq!(session.error, None);
        assert!(!session.loading && !session.refreshing);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failing_category_keeps_previous_items() {
        let mut server = mockito::Server::new_async().await;
        let _now_playing = server
            .mock("GET", "/movie/now_playing")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "results": [{ "id": 100, "title": "Fresh" }] }).to_string())
            .create_async()
            .await;
        let _popular = server
            .mock("GET", "/movie/popular")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let later = server
            .mock("GET", Matcher::Regex("^/movie/(top_rated|upcoming)".to_string()))
            .with_status(200)
            .with_body(json!({ "results": [] }).to_string())
            .expect(0)
            .create_async()
            .await;

        let store = Store::new();
        let previous = vec![movie(5, "Nova", &["Sci-Fi"], Category::Popular)];
        store.dispatch(Action::SetItems(previous.clone())).await;

        let commit = fetch_catalog(&store, &source_for(&server.url(), "key"), &FetchDelays::NONE, true).await;

        let session = store.snapshot().await;
        assert_eq!(commit, FetchCommit::Committed);
        assert_eq!(session.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(session.items.to_vec(), previous);
        assert!(!session.loading && !session.refreshing);
        later.assert_async().await;
    }

    #[tokio::test]
    async fn successful_refresh_replaces_items_and_clears_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Regex("^/movie/".to_string()))
            .with_status(200)
            .with_body(json!({ "results": [{ "id": 1, "title": "Same" }] }).to_string())
            .expect(4)
            .create_async()
            .await;

        let store = Store::new();
        store.dispatch(Action::SetError(Some(FETCH_ERROR_MESSAGE.to_string()))).await;

        fetch_catalog(&store, &source_for(&server.url(), "key"), &FetchDelays::NONE, true).await;

        let session = store.snapshot().await;
        assert_eq!(session.error, None);
        assert_eq!(
            session.items.iter().map(|item| item.category).collect::<Vec<_>>(),
            Category::ALL.to_vec()
        );
    }

    async fn serve_single_movie(server: &mut mockito::ServerGuard, id: u64, title: &str) -> mockito::Mock {
        server
            .mock("GET", Matcher::Regex("^/movie/".to_string()))
            .with_status(200)
            .with_body(json!({ "results": [{ "id": id, "title": title }] }).to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn overlapping_fetch_keeps_the_newest_result() {
        let mut slow_server = mockito::Server::new_async().await;
        let _slow = serve_single_movie(&mut slow_server, 1, "Stale").await;
        let mut fast_server = mockito::Server::new_async().await;
        let _fast = serve_single_movie(&mut fast_server, 2, "Fresh").await;

        let store = Store::new();
        let slow_source = source_for(&slow_server.url(), "key");
        let fast_source = source_for(&fast_server.url(), "key");
        // the initial load waits long enough for the refresh to start and
        // finish in between
        let delays = FetchDelays {
            initial_load_ms: 300,
            refresh_ms: 0,
        };

        let (initial, refresh) = tokio::join!(
            fetch_catalog(&store, &slow_source, &delays, false),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                fetch_catalog(&store, &fast_source, &delays, true).await
            }
        );

        let session = store.snapshot().await;
        assert_eq!(initial, FetchCommit::Superseded);
        assert_eq!(refresh, FetchCommit::Committed);
        assert!(session.items.iter().all(|item| item.title == "Fresh"));
        assert_eq!(session.items.len(), Category::ALL.len());
        assert_eq!(session.error, None);
        assert!(!session.loading && !session.refreshing);
    }

    fn test_context() -> (Arc<AppContext>, mpsc::Receiver<MessageFromBackend>) {
        let (tx, rx) = mpsc::channel(16);
        let mut config = Config::default();
        config.fetch_delays = FetchDelays::NONE;
        let state = State::new(config, reqwest::Client::new());
        let context = Arc::new(AppContext {
            store: Store::new(),
            state: Arc::new(RwLock::new(state)),
            tx,
        });
        (context, rx)
    }

    #[tokio::test]
    async fn filter_intents_update_the_store() {
        let (context, mut rx) = test_context();
        context
            .store
            .dispatch(Action::SetItems(vec![
                movie(5, "Nova", &["Sci-Fi"], Category::Popular),
                movie(6, "Ember", &["Drama"], Category::TopRated),
            ]))
            .await;

        handle_set_category(context.clone(), CategoryFilter::Only(Category::TopRated)).await;
        handle_set_search(context.clone(), "EMB".to_string()).await;
        handle_snapshot_request(context.clone()).await;

        let Some(MessageFromBackend::SnapshotUpdate(snapshot)) = rx.recv().await else {
            panic!("expected a snapshot update");
        };
        assert_eq!(snapshot.active_category, CategoryFilter::Only(Category::TopRated));
        assert_eq!(
            snapshot.visible_items.iter().map(|item| item.id).collect::<Vec<_>>(),
            vec![6]
        );
        assert_eq!(snapshot.total_items, 2);
    }

    #[tokio::test]
    async fn item_details_for_known_and_unknown_ids() {
        let (context, mut rx) = test_context();
        context
            .store
            .dispatch(Action::SetItems(vec![movie(5, "Nova", &[], Category::Popular)]))
            .await;

        handle_item_details_request(context.clone(), 5).await;
        let Some(MessageFromBackend::ItemDetailsResponse(5, Some(details))) = rx.recv().await else {
            panic!("expected details for item 5");
        };
        assert_eq!(details.item.title, "Nova");

        handle_item_details_request(context.clone(), 99).await;
        assert!(matches!(
            rx.recv().await,
            Some(MessageFromBackend::ItemDetailsResponse(99, None))
        ));
    }

    #[tokio::test]
    async fn fetch_request_runs_in_background() {
        let (context, _rx) = test_context();
        let mut changes = context.store.subscribe();

        handle_fetch_request(context.clone(), false).await;

        // the default configuration has no credential, so the bundled
        // catalog is committed
        loop {
            changes.changed().await.unwrap();
            let session = changes.borrow_and_update().clone();
            if !session.loading && !session.items.is_empty() {
                assert_eq!(session.items.len(), fallback_catalog().len());
                break;
            }
        }
    }
}
