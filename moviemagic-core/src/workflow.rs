use std::sync::Arc;
use std::time::Duration;

use moviemagic_catalog::MovieCatalog;
use tracing::{error, info, warn};

use crate::booking::{Booking, BookingReceipt, BookingRequest};
use crate::identity::CallerIdentity;
use crate::notifier::{ConfirmationMessage, Notifier, NotifyError};
use crate::repository::{BookingStore, UserDirectory};
use crate::{CoreError, CoreResult};

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Validates booking requests, persists accepted bookings and sends a
/// confirmation to the booker.
///
/// The persistence write is authoritative: once it succeeds the booking is
/// reported as successful, whatever happens to the notification.
#[derive(Clone)]
pub struct BookingWorkflow {
    catalog: Arc<MovieCatalog>,
    users: Arc<dyn UserDirectory>,
    bookings: Arc<dyn BookingStore>,
    notifier: Arc<dyn Notifier>,
    notification_timeout: Duration,
}

impl BookingWorkflow {
    pub fn new(
        catalog: Arc<MovieCatalog>,
        users: Arc<dyn UserDirectory>,
        bookings: Arc<dyn BookingStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            users,
            bookings,
            notifier,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Validate, persist, then notify. Validation failures write nothing.
    pub async fn create_booking(
        &self,
        caller: Option<&CallerIdentity>,
        request: BookingRequest,
    ) -> CoreResult<BookingReceipt> {
        let caller = caller.ok_or(CoreError::Unauthenticated)?;

        let movie = request
            .movie_id
            .and_then(|id| self.catalog.get_movie(id))
            .ok_or_else(|| CoreError::NotFound("Movie not found".to_string()))?;

        if !movie.has_showtime(&request.showtime) {
            return Err(CoreError::InvalidInput("Invalid showtime".to_string()));
        }

        let seats = request
            .seat_count()
            .ok_or_else(|| CoreError::InvalidInput("Invalid number of seats".to_string()))?;

        let booking = Booking::confirmed(caller.username(), movie, request.showtime, seats);

        self.bookings.create_booking(&booking).await.map_err(|e| {
            error!("Failed to store booking {} for {}: {}", booking.id, caller, e);
            CoreError::StoreUnavailable(e.to_string())
        })?;

        info!(
            "Booking confirmed: {} ({} x {} @ {}) for {}",
            booking.id, booking.seats, booking.movie_title, booking.showtime, caller
        );

        let notified = match self.send_confirmation(&booking).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!("Confirmation for booking {} not delivered: {}", booking.id, e);
                false
            }
        };

        Ok(BookingReceipt {
            success: true,
            booking_id: booking.id,
            notified,
        })
    }

    /// Bookings made by the caller, newest first. An unreachable store yields an empty list.
    pub async fn list_bookings_for_user(&self, caller: &CallerIdentity) -> Vec<Booking> {
        match self.bookings.list_by_username(caller.username()).await {
            Ok(mut bookings) => {
                bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                bookings
            }
            Err(e) => {
                warn!("Could not list bookings for {}: {}", caller, e);
                Vec::new()
            }
        }
    }

    /// `Ok(false)` when there is nobody to notify.
    async fn send_confirmation(&self, booking: &Booking) -> Result<bool, NotifyError> {
        let user = self
            .users
            .get_user(&booking.username)
            .await
            .map_err(|e| NotifyError::Unavailable(e.to_string()))?;

        let email = match user.as_ref().and_then(|u| u.notification_address()) {
            Some(email) => email,
            None => {
                info!("No email found for {}, skipping notification", booking.username);
                return Ok(false);
            }
        };

        let message = ConfirmationMessage::for_booking(booking);

        tokio::time::timeout(
            self.notification_timeout,
            self.notifier.send(email, &message.subject, &message.body),
        )
        .await
        .map_err(|_| NotifyError::TimedOut(self.notification_timeout.as_millis()))??;

        info!("Notification sent for booking {}", booking.id);
        Ok(true)
    }
}
