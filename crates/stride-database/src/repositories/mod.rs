//! Repository implementations for the tables the sweep touches.

pub mod activity;
pub mod notification;
pub mod user;

pub use activity::ActivityRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
