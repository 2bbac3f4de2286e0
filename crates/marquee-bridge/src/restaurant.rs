use serde::{Deserialize, Serialize};

/// Kind of venue as reported by the places provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantType {
    Restaurant,
    Cafe,
    FastFood,
    /// Any type the application has no dedicated handling for.
    #[serde(other)]
    Unknown,
}

/// A venue in the restaurant variant of the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Place identifier from the places provider.
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RestaurantType,
    pub cuisine: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Short vicinity address.
    pub address: Option<String>,
    /// Distance from the user, in metres.
    pub distance: Option<f64>,
    /// Provider-supplied photo URL.
    pub image_url: Option<String>,
    pub rating: Option<f32>,
    pub open_now: Option<bool>,
}
