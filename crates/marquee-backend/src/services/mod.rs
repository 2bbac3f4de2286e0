//! Backend service handlers for intents sent by the presentation layer.
//!
//! Handlers operate on the shared `AppContext`: they dispatch store actions,
//! run catalog fetches, and answer queries back over the bridge.

pub mod catalog_service;
pub mod config_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
