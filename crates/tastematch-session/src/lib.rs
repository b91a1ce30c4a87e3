//! # tastematch-session
//!
//! In-memory store for comparison sessions. A session is created by the
//! first user with their taste profile, shared via its id, joined by the
//! second user, and expires 30 minutes after creation.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{ComparisonSession, SessionStore, SESSION_TTL_MINUTES};
