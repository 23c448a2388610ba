pub mod booking;
pub mod identity;
pub mod memory;
pub mod notifier;
pub mod repository;
pub mod user;
pub mod workflow;

pub use booking::{Booking, BookingReceipt, BookingRequest, BookingStatus};
pub use identity::CallerIdentity;
pub use notifier::{ConfirmationMessage, Notifier, NotifyError};
pub use repository::{BookingStore, StoreError, UserDirectory};
pub use user::User;
pub use workflow::BookingWorkflow;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Booking store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
