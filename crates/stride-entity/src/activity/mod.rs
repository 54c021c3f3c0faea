//! Activity (run session) domain entities.

pub mod model;
pub mod status;

pub use model::{ActivitySession, SessionStart};
pub use status::SessionStatus;
