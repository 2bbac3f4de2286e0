/// Label used for genre ids missing from [`MOVIE_GENRES`].
pub const UNKNOWN_GENRE: &str = "Unknown";

/// TMDB movie genre ids and their display labels.
const MOVIE_GENRES: [(u32, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Returns the display label for a provider genre id.
pub fn genre_label(id: u32) -> &'static str {
    MOVIE_GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_GENRE)
}

/// Maps genre ids to labels, keeping order and duplicates. Unrecognized ids
/// become [`UNKNOWN_GENRE`] instead of being dropped.
pub fn genre_labels(ids: &[u32]) -> Vec<String> {
    ids.iter().map(|id| genre_label(*id).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_kept_as_unknown() {
        assert_eq!(
            genre_labels(&[878, 1, 10752, 878]),
            vec!["Sci-Fi", "Unknown", "War", "Sci-Fi"]
        );
    }

    #[test]
    fn empty_ids_give_no_labels() {
        assert!(genre_labels(&[]).is_empty());
    }
}
