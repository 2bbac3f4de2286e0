//! Communication bridge between the presentation layer and the backend.
//!
//! This crate defines the catalog types shared by both sides and the
//! messages exchanged between them:
//! - The presentation layer sends intents (fetch or refresh the catalog,
//!   change the category filter, change the search text, open an item).
//! - The backend pushes events (catalog snapshots, item details,
//!   notifications).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`]. The presentation layer never mutates catalog state
//! directly; it only reads snapshots and sends intents.

pub mod catalog;
pub mod config;
pub mod notification;
pub mod restaurant;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::catalog::{CatalogItem, Category, CategoryFilter, ItemId};

/// Read-only view of the catalog session, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    /// First-load spinner state.
    pub loading: bool,
    /// Pull-to-refresh spinner state.
    pub refreshing: bool,
    /// User-facing message from the most recent failed fetch.
    pub error: Option<String>,
    pub active_category: CategoryFilter,
    pub search_text: String,
    /// Items passing the active filter and search text, in catalog order.
    pub visible_items: Vec<CatalogItem>,
    /// Number of items per category over the whole catalog, in enumeration
    /// order.
    pub category_counts: Vec<(Category, usize)>,
    /// Items with a wide image, for the featured carousel.
    pub featured: Vec<CatalogItem>,
    /// Size of the whole catalog, regardless of filters.
    pub total_items: usize,
}

/// Everything the detail view shows for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub item: CatalogItem,
    /// Backdrop, poster, or placeholder, in that order of preference.
    pub hero_image: String,
    /// Video search link for the item's trailer.
    pub trailer_search_url: String,
}

/// Messages emitted by the backend to inform the presentation layer of state
/// updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request.
    ConfigurationResponse(config::Config),
    /// The catalog session changed, or a snapshot was requested.
    SnapshotUpdate(CatalogSnapshot),
    /// Response to an item details request. `None` when the id is not part
    /// of the current catalog.
    ItemDetailsResponse(ItemId, Option<ItemDetails>),
}

/// Intents issued by the presentation layer.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Fetch the catalog again. `refresh` selects the pull-to-refresh
    /// indicator instead of the first-load one.
    FetchCatalog { refresh: bool },
    SetCategory(CategoryFilter),
    SetSearch(String),
    /// Ask for the current snapshot without changing anything.
    SnapshotRequest,
    ItemDetailsRequest(ItemId),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the presentation layer and the backend.
pub struct BridgeChannels {
    /// Receiver used by the presentation layer to get messages from the
    /// backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the presentation layer to send intents to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get intents.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
