use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use moviemagic_catalog::{Movie, MovieId};

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
}

/// GET /movies
async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let movies = state
        .workflow
        .catalog()
        .list_movies()
        .into_iter()
        .cloned()
        .collect();
    Json(movies)
}

/// GET /movies/{id}
async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> Result<Json<Movie>, AppError> {
    state
        .workflow
        .catalog()
        .get_movie(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Movie not found".to_string()))
}
