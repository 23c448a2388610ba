pub mod events;

pub use events::EmailNotification;
