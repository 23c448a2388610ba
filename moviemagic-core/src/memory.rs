//! In-memory collaborators for tests and local runs without external services.
//!
//! Each type can be switched into a failing mode to exercise the workflow's
//! partial-failure handling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::booking::Booking;
use crate::notifier::{Notifier, NotifyError};
use crate::repository::{BookingStore, StoreError, UserDirectory};
use crate::user::User;

fn lock_failed() -> StoreError {
    StoreError::Unavailable("Mutex lock failed".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<String, User>>,
    unavailable: AtomicBool,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("user directory offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let users = self.users.lock().map_err(|_| lock_failed())?;
        Ok(users.get(username).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        self.check_available()?;
        let mut users = self.users.lock().map_err(|_| lock_failed())?;
        if users.contains_key(&user.username) {
            return Err(StoreError::AlreadyExists(user.username.clone()));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
    unavailable: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of everything written so far, regardless of availability mode
    pub fn all(&self) -> Vec<Booking> {
        self.bookings.lock().map(|b| b.clone()).unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("booking table offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        self.check_available()?;
        let mut bookings = self.bookings.lock().map_err(|_| lock_failed())?;
        bookings.push(booking.clone());
        Ok(())
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<Booking>, StoreError> {
        self.check_available()?;
        let bookings = self.bookings.lock().map_err(|_| lock_failed())?;
        Ok(bookings
            .iter()
            .filter(|b| b.username == username)
            .cloned()
            .collect())
    }
}

/// A delivered (or attempted) message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// Records every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    unavailable: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every send sleep before completing
    pub fn set_delay(&self, delay: Option<Duration>) {
        if let Ok(mut d) = self.delay.lock() {
            *d = delay;
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let delay = self.delay.lock().ok().and_then(|d| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(NotifyError::Unavailable("topic unreachable".to_string()));
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| NotifyError::Unavailable("Mutex lock failed".to_string()))?;
        sent.push(SentMessage {
            email: email.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
