//! Deterministic photo selection for venues without a provider photo.

use marquee_bridge::restaurant::{Restaurant, RestaurantType};

const RESTAURANT_PHOTOS: [&str; 7] = [
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=600&q=80",
    "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=600&q=80",
    "https://images.unsplash.com/photo-1537047902294-62a40c20a6ae?w=600&q=80",
    "https://images.unsplash.com/photo-1550966871-3ed3cdb5ed0c?w=600&q=80",
    "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=600&q=80",
    "https://images.unsplash.com/photo-1466978913421-dad2ebd01d17?w=600&q=80",
    "https://images.unsplash.com/photo-1544025162-d76694265947?w=600&q=80",
];

const CAFE_PHOTOS: [&str; 5] = [
    "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?w=600&q=80",
    "https://images.unsplash.com/photo-1445116572660-236099ec97a0?w=600&q=80",
    "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=600&q=80",
    "https://images.unsplash.com/photo-1559925393-8be0ec4767c8?w=600&q=80",
    "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=600&q=80",
];

const FAST_FOOD_PHOTOS: [&str; 4] = [
    "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=600&q=80",
    "https://images.unsplash.com/photo-1551782450-a2132b4ba21d?w=600&q=80",
    "https://images.unsplash.com/photo-1565299507177-b0ac66763828?w=600&q=80",
    "https://images.unsplash.com/photo-1549515604-6a21b4dc7f5c?w=600&q=80",
];

/// Stable 24-bit string hash: `hash = (hash * 31 + unit) mod 2^24` over the
/// UTF-16 code units of `id`.
pub fn stable_hash(id: &str) -> u32 {
    id.encode_utf16()
        .fold(0u32, |hash, unit| (hash * 31 + u32::from(unit)) & 0x00ff_ffff)
}

fn photo_pool(kind: RestaurantType) -> &'static [&'static str] {
    match kind {
        RestaurantType::Cafe => &CAFE_PHOTOS,
        RestaurantType::FastFood => &FAST_FOOD_PHOTOS,
        RestaurantType::Restaurant | RestaurantType::Unknown => &RESTAURANT_PHOTOS,
    }
}

/// Returns the provider photo when there is one, otherwise a curated photo
/// for the venue type picked by hashing the venue id. The same id always
/// yields the same photo.
pub fn select_photo(restaurant: &Restaurant) -> &str {
    match restaurant.image_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => {
            let pool = photo_pool(restaurant.kind);
            pool[stable_hash(&restaurant.id) as usize % pool.len()]
        }
    }
}
