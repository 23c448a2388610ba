use async_trait::async_trait;

use crate::booking::Booking;
use crate::user::User;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
}

/// Account lookup and registration
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `AlreadyExists` if the username is taken
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;
}

/// Append-only booking records
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Single write, no read-modify-write
    async fn create_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    async fn list_by_username(&self, username: &str) -> Result<Vec<Booking>, StoreError>;
}
