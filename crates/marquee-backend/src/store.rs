use std::sync::Arc;

use marquee_bridge::{
    CatalogSnapshot,
    catalog::{CatalogItem, Category, CategoryFilter, ItemId},
};
use tokio::sync::{RwLock, watch};

/// Number of items shown in the featured carousel.
pub const FEATURED_LIMIT: usize = 10;

/// The catalog session: the current snapshot of everything the presentation
/// layer renders.
///
/// Values are never mutated in place. Every [`Action`] produces a new value
/// that shares the untouched fields with its predecessor, so a snapshot held
/// by a consumer stays valid after later transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Catalog items in arrival order.
    pub items: Arc<[CatalogItem]>,
    pub loading: bool,
    pub refreshing: bool,
    /// User-facing message, set only when the latest fetch failed.
    pub error: Option<String>,
    pub active_category: CategoryFilter,
    pub search_text: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            loading: false,
            refreshing: false,
            error: None,
            active_category: CategoryFilter::All,
            search_text: String::new(),
        }
    }
}

/// State transitions accepted by [`Store::dispatch`]. Each one replaces
/// exactly the field it names.
#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetRefreshing(bool),
    /// Wholesale replacement of the catalog.
    SetItems(Vec<CatalogItem>),
    SetError(Option<String>),
    SetCategory(CategoryFilter),
    SetSearch(String),
}

impl SessionState {
    /// Returns the state that results from applying `action` to `self`.
    pub fn reduce(&self, action: Action) -> SessionState {
        let mut next = self.clone();
        match action {
            Action::SetLoading(loading) => next.loading = loading,
            Action::SetRefreshing(refreshing) => next.refreshing = refreshing,
            Action::SetItems(items) => next.items = Arc::from(items),
            Action::SetError(error) => next.error = error,
            Action::SetCategory(category) => next.active_category = category,
            Action::SetSearch(text) => next.search_text = text,
        }
        next
    }

    /// Items passing both the active category filter and the search text,
    /// in catalog order. Recomputed on every call.
    pub fn filtered_view(&self) -> Vec<&CatalogItem> {
        let needle = self.search_text.to_lowercase();
        self.items
            .iter()
            .filter(|item| self.active_category.matches(item.category))
            .filter(|item| item.matches_search(&needle))
            .collect()
    }

    /// Number of items per category over the whole catalog, in enumeration
    /// order. Filters and search text are ignored.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }

    /// First `limit` items that carry a wide image.
    pub fn featured(&self, limit: usize) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.backdrop_url.as_deref().is_some_and(|url| !url.is_empty()))
            .take(limit)
            .collect()
    }

    pub fn find_item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Renders the session into the form sent over the bridge.
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            loading: self.loading,
            refreshing: self.refreshing,
            error: self.error.clone(),
            active_category: self.active_category,
            search_text: self.search_text.clone(),
            visible_items: self.filtered_view().into_iter().cloned().collect(),
            category_counts: self.category_counts(),
            featured: self.featured(FEATURED_LIMIT).into_iter().cloned().collect(),
            total_items: self.items.len(),
        }
    }
}

/// Identifies one fetch cycle. Only the most recently started cycle may
/// commit its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    is_refresh: bool,
}

impl FetchTicket {
    pub fn is_refresh(&self) -> bool {
        self.is_refresh
    }
}

/// Result of trying to finish a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCommit {
    /// The result was written into the session.
    Committed,
    /// A newer fetch started meanwhile; nothing was written.
    Superseded,
}

#[derive(Debug, Default)]
struct StoreInner {
    session: Arc<SessionState>,
    generation: u64,
}

/// Owner of the catalog session. Consumers read snapshots and send
/// [`Action`]s; nothing else writes the session.
///
/// Every new session is also published to [`Store::subscribe`]rs.
#[derive(Debug)]
pub struct Store {
    inner: RwLock<StoreInner>,
    changes: watch::Sender<Arc<SessionState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let inner = StoreInner::default();
        let (changes, _) = watch::channel(inner.session.clone());
        Self {
            inner: RwLock::new(inner),
            changes,
        }
    }

    /// Receiver that is notified with every session produced from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.changes.subscribe()
    }

    fn publish(&self, inner: &mut StoreInner, next: SessionState) -> Arc<SessionState> {
        inner.session = Arc::new(next);
        self.changes.send_replace(inner.session.clone());
        inner.session.clone()
    }

    /// Current session. The returned value never changes, later transitions
    /// produce new values.
    pub async fn snapshot(&self) -> Arc<SessionState> {
        self.inner.read().await.session.clone()
    }

    /// Applies one transition and returns the resulting session.
    pub async fn dispatch(&self, action: Action) -> Arc<SessionState> {
        let mut inner = self.inner.write().await;
        let next = inner.session.reduce(action);
        self.publish(&mut inner, next)
    }

    /// Filtered items of the current session.
    pub async fn filtered_view(&self) -> Vec<CatalogItem> {
        self.snapshot()
            .await
            .filtered_view()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Starts a fetch cycle: raises the matching busy flag, clears the error
    /// and makes the returned ticket the only one allowed to commit.
    pub async fn begin_fetch(&self, is_refresh: bool) -> FetchTicket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;

        let busy = if is_refresh {
            Action::SetRefreshing(true)
        } else {
            Action::SetLoading(true)
        };
        let next = inner.session.reduce(busy).reduce(Action::SetError(None));
        self.publish(&mut inner, next);

        FetchTicket {
            generation: inner.generation,
            is_refresh,
        }
    }

    /// Finishes a fetch cycle. On success the items are replaced, on failure
    /// only the error is set. Both busy flags are cleared either way. Does
    /// nothing when `ticket` belongs to a superseded cycle.
    pub async fn finish_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<CatalogItem>, String>,
    ) -> FetchCommit {
        let mut inner = self.inner.write().await;
        if ticket.generation != inner.generation {
            return FetchCommit::Superseded;
        }

        let outcome = match result {
            Ok(items) => Action::SetItems(items),
            Err(message) => Action::SetError(Some(message)),
        };
        let next = inner
            .session
            .reduce(outcome)
            .reduce(Action::SetLoading(false))
            .reduce(Action::SetRefreshing(false));
        self.publish(&mut inner, next);

        FetchCommit::Committed
    }
}
