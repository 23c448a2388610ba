use async_trait::async_trait;

use crate::booking::Booking;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification service unavailable: {0}")]
    Unavailable(String),
    #[error("Notification timed out after {0} ms")]
    TimedOut(u128),
}

/// Best-effort outbound message dispatch
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationMessage {
    pub subject: String,
    pub body: String,
}

impl ConfirmationMessage {
    pub fn for_booking(booking: &Booking) -> Self {
        let subject = format!("Booking Confirmation: {}", booking.movie_title);
        let body = format!(
            "Booking Confirmation for {}:\n\n\
             Movie: {}\n\
             Showtime: {}\n\
             Seats: {}\n\
             Booking ID: {}\n\n\
             Thank you for your booking!\n",
            booking.username, booking.movie_title, booking.showtime, booking.seats, booking.id,
        );

        Self { subject, body }
    }
}
