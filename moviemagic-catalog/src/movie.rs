use serde::{Deserialize, Serialize};

pub type MovieId = u32;

/// A bookable movie and the fixed set of showtimes it plays at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    /// Time-of-day strings such as "14:00", in screening order
    pub showtimes: Vec<String>,
}

impl Movie {
    pub fn new(id: MovieId, title: &str, genre: &str, showtimes: &[&str]) -> Self {
        Self {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
            showtimes: showtimes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Exact match only; "14:00" and "14:00:00" are different showtimes.
    pub fn has_showtime(&self, showtime: &str) -> bool {
        self.showtimes.iter().any(|s| s == showtime)
    }
}
