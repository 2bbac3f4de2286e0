//! Backend runtime entry point and public API surface.
//!
//! This crate owns the catalog store, the provider adapter that feeds it,
//! and the runtime that routes bridge intents to service handlers.

mod app;
mod config;
mod details;
mod fallback;
mod genres;
mod photos;
mod runtime;
mod services;
mod source;
mod state;
mod store;

pub use crate::details::{item_details, trailer_search_url};
pub use crate::fallback::fallback_catalog;
pub use crate::photos::select_photo;
pub use crate::runtime::run;
pub use crate::services::catalog_service::{FETCH_ERROR_MESSAGE, fetch_catalog};
pub use crate::source::{CatalogSource, SourceError, TmdbClient};
pub use crate::store::{Action, FetchCommit, FetchTicket, SessionState, Store};
