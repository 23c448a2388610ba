use std::collections::BTreeMap;

use crate::movie::{Movie, MovieId};

/// Immutable set of bookable movies, keyed by id.
///
/// Built once at startup from configuration and shared read-only afterwards,
/// so showtimes cannot change for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    movies: BTreeMap<MovieId, Movie>,
}

impl MovieCatalog {
    /// Validate and index the given movies.
    pub fn new(movies: Vec<Movie>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();

        for movie in movies {
            if movie.title.trim().is_empty() {
                return Err(CatalogError::InvalidMovie {
                    id: movie.id,
                    reason: "title is empty".to_string(),
                });
            }
            if movie.showtimes.is_empty() {
                return Err(CatalogError::InvalidMovie {
                    id: movie.id,
                    reason: "no showtimes".to_string(),
                });
            }
            if movie.showtimes.iter().any(|s| s.trim().is_empty()) {
                return Err(CatalogError::InvalidMovie {
                    id: movie.id,
                    reason: "blank showtime".to_string(),
                });
            }

            let id = movie.id;
            if index.insert(id, movie).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }

        Ok(Self { movies: index })
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All movies in ascending id order
    pub fn list_movies(&self) -> Vec<&Movie> {
        self.movies.values().collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate movie id: {0}")]
    DuplicateId(MovieId),

    #[error("Invalid movie {id}: {reason}")]
    InvalidMovie { id: MovieId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<Movie> {
        vec![
            Movie::new(2, "Kannappa", "Drama", &["11:00", "15:00", "19:00"]),
            Movie::new(1, "Kubeera", "Action", &["10:00", "14:00", "18:00"]),
            Movie::new(3, "Final Destination", "Sci-Fi", &["12:00", "16:00", "20:00"]),
        ]
    }

    #[test]
    fn test_lookup_and_ordering() {
        let catalog = MovieCatalog::new(seed()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get_movie(1).unwrap().title, "Kubeera");
        assert!(catalog.get_movie(99).is_none());

        let ids: Vec<MovieId> = catalog.list_movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut movies = seed();
        movies.push(Movie::new(1, "Other", "Drama", &["09:00"]));

        let result = MovieCatalog::new(movies);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId(1));
    }

    #[test]
    fn test_movie_without_showtimes_rejected() {
        let result = MovieCatalog::new(vec![Movie::new(7, "Silent", "Drama", &[])]);
        assert!(matches!(result, Err(CatalogError::InvalidMovie { id: 7, .. })));
    }
}
