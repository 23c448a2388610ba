use chrono::{DateTime, Utc};
use moviemagic_catalog::{Movie, MovieId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// A persisted seat reservation for one showtime.
///
/// `movie_title` is copied from the catalog when the booking is made and is
/// not kept in sync with later catalog changes. Records are written once and
/// never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub username: String,
    pub movie_id: MovieId,
    pub movie_title: String,
    pub showtime: String,
    pub seats: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// New confirmed booking with a freshly generated id
    pub fn confirmed(username: &str, movie: &Movie, showtime: String, seats: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            movie_id: movie.id,
            movie_title: movie.title.clone(),
            showtime,
            seats,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }
}

/// Booking request as submitted by a client.
///
/// Every field is read leniently so that malformed values surface as the
/// workflow's own validation errors, in validation order, rather than as body
/// deserialization failures. `movie_id` accepts a number or a numeric string;
/// anything else reads as no movie. A non-string `showtime` reads as empty.
/// `seats` is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(default, deserialize_with = "lenient_movie_id")]
    pub movie_id: Option<MovieId>,
    #[serde(default, deserialize_with = "lenient_showtime")]
    pub showtime: String,
    #[serde(default)]
    pub seats: serde_json::Value,
}

impl BookingRequest {
    pub fn new(movie_id: MovieId, showtime: &str, seats: impl Into<serde_json::Value>) -> Self {
        Self {
            movie_id: Some(movie_id),
            showtime: showtime.to_string(),
            seats: seats.into(),
        }
    }

    /// Reads a request out of an already-parsed JSON body.
    ///
    /// Only a body that is not a JSON object fails here.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Positive integral seat count, or `None` for zero, negatives, fractions and non-numbers
    pub fn seat_count(&self) -> Option<u32> {
        self.seats
            .as_u64()
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
    }
}

fn lenient_movie_id<'de, D>(deserializer: D) -> Result<Option<MovieId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let id = match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| MovieId::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<MovieId>().ok(),
        _ => None,
    };
    Ok(id)
}

fn lenient_showtime<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingReceipt {
    pub success: bool,
    pub booking_id: Uuid,
    pub notified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seat_count_parsing() {
        assert_eq!(BookingRequest::new(1, "14:00", 2).seat_count(), Some(2));
        assert_eq!(BookingRequest::new(1, "14:00", 0).seat_count(), None);
        assert_eq!(BookingRequest::new(1, "14:00", -3).seat_count(), None);
        assert_eq!(BookingRequest::new(1, "14:00", 2.5).seat_count(), None);
        assert_eq!(BookingRequest::new(1, "14:00", "2").seat_count(), None);
        assert_eq!(BookingRequest::new(1, "14:00", json!(null)).seat_count(), None);
        assert_eq!(BookingRequest::new(1, "14:00", u64::MAX).seat_count(), None);
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{"movie_id": 1, "showtime": "14:00", "seats": "two"}"#;
        let req: BookingRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(req.movie_id, Some(1));
        assert_eq!(req.seat_count(), None);
    }

    #[test]
    fn test_movie_id_accepts_numeric_strings() {
        let req = BookingRequest::from_json(json!({"movie_id": "1", "showtime": "14:00", "seats": 2}))
            .expect("Failed to deserialize");
        assert_eq!(req.movie_id, Some(1));

        let req = BookingRequest::from_json(json!({"movie_id": " 2 ", "showtime": "14:00", "seats": 2}))
            .expect("Failed to deserialize");
        assert_eq!(req.movie_id, Some(2));
    }

    #[test]
    fn test_unusable_movie_id_reads_as_none() {
        for movie_id in [json!("abc"), json!(-1), json!(1.5), json!(null), json!([1]), json!(u64::MAX)] {
            let req = BookingRequest::from_json(json!({"movie_id": movie_id, "showtime": "14:00", "seats": 2}))
                .expect("Failed to deserialize");
            assert_eq!(req.movie_id, None, "movie_id {} should not resolve", movie_id);
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let req = BookingRequest::from_json(json!({"movie_id": 1, "showtime": "14:00"}))
            .expect("Failed to deserialize");
        assert_eq!(req.seat_count(), None);

        let req = BookingRequest::from_json(json!({})).expect("Failed to deserialize");
        assert_eq!(req.movie_id, None);
        assert_eq!(req.showtime, "");

        let req = BookingRequest::from_json(json!({"movie_id": 1, "showtime": 1400, "seats": 2}))
            .expect("Failed to deserialize");
        assert_eq!(req.showtime, "");
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(BookingRequest::from_json(json!("book me")).is_err());
        assert!(BookingRequest::from_json(json!(42)).is_err());
    }

    #[test]
    fn test_confirmed_booking_copies_title() {
        let movie = Movie::new(1, "Kubeera", "Action", &["10:00", "14:00", "18:00"]);
        let booking = Booking::confirmed("alice", &movie, "14:00".to_string(), 2);

        assert_eq!(booking.movie_title, "Kubeera");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.status.to_string(), "CONFIRMED");
        assert_eq!("CONFIRMED".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
    }
}
