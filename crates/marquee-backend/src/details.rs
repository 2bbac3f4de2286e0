use marquee_bridge::{ItemDetails, catalog::CatalogItem};
use reqwest::Url;

const TRAILER_SEARCH_BASE: &str = "https://www.youtube.com/results";

/// Video search link for `"<title> official trailer"`.
pub fn trailer_search_url(item: &CatalogItem) -> Url {
    let query = format!("{} official trailer", item.title);
    Url::parse_with_params(TRAILER_SEARCH_BASE, &[("search_query", query.as_str())])
        .expect("failed to build a trailer search URL")
}

/// Collects what the detail view shows for `item`.
pub fn item_details(item: &CatalogItem) -> ItemDetails {
    ItemDetails {
        hero_image: item.hero_image(),
        trailer_search_url: trailer_search_url(item).to_string(),
        item: item.clone(),
    }
}
