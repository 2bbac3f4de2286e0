use marquee_bridge::catalog::{CatalogItem, Category};

use crate::genres::genre_labels;

/// A hand-authored catalog record bundled with the application.
struct FallbackMovie {
    id: u64,
    title: &'static str,
    overview: &'static str,
    content_rating: Option<&'static str>,
    release_date: &'static str,
    genre_ids: &'static [u32],
    category: Category,
    with_backdrop: bool,
    store_url: Option<&'static str>,
}

const FALLBACK_MOVIES: &[FallbackMovie] = &[
    FallbackMovie {
        id: 693134,
        title: "Dune: Part Two",
        overview: "Paul Atreides unites with the Fremen while seeking revenge against the conspirators who destroyed his family.",
        content_rating: Some("PG-13"),
        release_date: "2024-02-27",
        genre_ids: &[878, 12],
        category: Category::NowPlaying,
        with_backdrop: true,
        store_url: Some("https://tv.apple.com/movie/dune-part-two"),
    },
    FallbackMovie {
        id: 1022789,
        title: "Inside Out 2",
        overview: "New emotions arrive in Riley's mind just as she starts high school.",
        content_rating: Some("PG"),
        release_date: "2024-06-11",
        genre_ids: &[16, 10751, 12, 35],
        category: Category::NowPlaying,
        with_backdrop: true,
        store_url: None,
    },
    FallbackMovie {
        id: 748783,
        title: "The Garfield Movie",
        overview: "An indoor cat is pulled into a heist after a reunion with his long-lost father.",
        content_rating: Some("PG"),
        release_date: "2024-04-30",
        genre_ids: &[16, 35, 10751],
        category: Category::NowPlaying,
        with_backdrop: false,
        store_url: None,
    },
    FallbackMovie {
        id: 872585,
        title: "Oppenheimer",
        overview: "The story of the physicist who led the project that built the first atomic bomb.",
        content_rating: Some("R"),
        release_date: "2023-07-19",
        genre_ids: &[18, 36],
        category: Category::Popular,
        with_backdrop: true,
        store_url: Some("https://tv.apple.com/movie/oppenheimer"),
    },
    FallbackMovie {
        id: 346698,
        title: "Barbie",
        overview: "A doll living in Barbieland is expelled for not being perfect enough and sets off for the real world.",
        content_rating: Some("PG-13"),
        release_date: "2023-07-19",
        genre_ids: &[35, 12],
        category: Category::Popular,
        with_backdrop: true,
        store_url: None,
    },
    FallbackMovie {
        id: 569094,
        title: "Spider-Man: Across the Spider-Verse",
        overview: "Miles Morales is catapulted across the multiverse and meets a team of Spider-People.",
        content_rating: Some("PG"),
        release_date: "2023-05-31",
        genre_ids: &[16, 28, 12, 878],
        category: Category::Popular,
        with_backdrop: false,
        store_url: None,
    },
    FallbackMovie {
        id: 238,
        title: "The Godfather",
        overview: "The aging patriarch of a crime dynasty hands control of his empire to his reluctant son.",
        content_rating: Some("R"),
        release_date: "1972-03-14",
        genre_ids: &[18, 80],
        category: Category::TopRated,
        with_backdrop: true,
        store_url: Some("https://tv.apple.com/movie/the-godfather"),
    },
    FallbackMovie {
        id: 424,
        title: "Schindler's List",
        overview: "A businessman saves the lives of more than a thousand refugees during the war.",
        content_rating: Some("R"),
        release_date: "1993-12-15",
        genre_ids: &[18, 36, 10752],
        category: Category::TopRated,
        with_backdrop: false,
        store_url: None,
    },
    FallbackMovie {
        id: 129,
        title: "Spirited Away",
        overview: "A girl wanders into a world ruled by gods and spirits and must work to free her parents.",
        content_rating: Some("PG"),
        release_date: "2001-07-20",
        genre_ids: &[16, 10751, 14],
        category: Category::TopRated,
        with_backdrop: true,
        store_url: None,
    },
    FallbackMovie {
        id: 912649,
        title: "Venom: The Last Dance",
        overview: "Eddie and Venom are on the run, hunted by both of their worlds.",
        content_rating: Some("PG-13"),
        release_date: "2024-10-22",
        genre_ids: &[28, 878, 12],
        category: Category::Upcoming,
        with_backdrop: true,
        store_url: None,
    },
    FallbackMovie {
        id: 1184918,
        title: "The Wild Robot",
        overview: "A robot shipwrecked on an uninhabited island learns to adapt and raises an orphaned gosling.",
        content_rating: Some("PG"),
        release_date: "2024-09-12",
        genre_ids: &[16, 878, 10751],
        category: Category::Upcoming,
        with_backdrop: false,
        store_url: None,
    },
    FallbackMovie {
        id: 558449,
        title: "Gladiator II",
        overview: "Years after witnessing the death of a hero, Lucius is forced to enter the Colosseum.",
        content_rating: None,
        release_date: "2024-11-05",
        genre_ids: &[28, 12, 18],
        category: Category::Upcoming,
        with_backdrop: true,
        store_url: None,
    },
];

impl FallbackMovie {
    fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            title: self.title.to_string(),
            overview: self.overview.to_string(),
            poster_url: format!("https://picsum.photos/seed/movie-{}/400/600", self.id),
            backdrop_url: self
                .with_backdrop
                .then(|| format!("https://picsum.photos/seed/backdrop-{}/780/439", self.id)),
            content_rating: self.content_rating.map(str::to_string),
            release_date: self.release_date.to_string(),
            genre_ids: self.genre_ids.to_vec(),
            genres: genre_labels(self.genre_ids),
            category: self.category,
            store_url: self.store_url.map(str::to_string),
        }
    }
}

/// The bundled catalog used when no provider credential is configured,
/// grouped by category in enumeration order.
pub fn fallback_catalog() -> Vec<CatalogItem> {
    FALLBACK_MOVIES.iter().map(FallbackMovie::to_item).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_category_is_represented() {
        let items = fallback_catalog();
        for category in Category::ALL {
            assert!(items.iter().any(|item| item.category == category));
        }
    }

    #[test]
    fn ids_are_unique_and_genres_aligned() {
        let items = fallback_catalog();
        let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), items.len());
        for item in &items {
            assert_eq!(item.genres.len(), item.genre_ids.len());
            assert!(!item.poster_url.is_empty());
        }
    }
}
