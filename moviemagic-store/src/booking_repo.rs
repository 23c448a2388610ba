use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moviemagic_core::{Booking, BookingStatus, BookingStore, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::unavailable;

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    username: String,
    movie_id: i64,
    movie_title: String,
    showtime: String,
    seats: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |field: &str| StoreError::Unavailable(format!("Corrupt booking {}: bad {}", id, field));

        Ok(Booking {
            id,
            movie_id: u32::try_from(row.movie_id).map_err(|_| corrupt("movie_id"))?,
            seats: u32::try_from(row.seats).map_err(|_| corrupt("seats"))?,
            status: row.status.parse::<BookingStatus>().map_err(|_| corrupt("status"))?,
            username: row.username,
            movie_title: row.movie_title,
            showtime: row.showtime,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, username, movie_id, movie_title, showtime, seats, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.username)
        .bind(i64::from(booking.movie_id))
        .bind(&booking.movie_title)
        .bind(&booking.showtime)
        .bind(i64::from(booking.seats))
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, username, movie_id, movie_title, showtime, seats, status, created_at
            FROM bookings
            WHERE username = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}
