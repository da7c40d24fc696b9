//! Eventing - Session Notifications

mod session_event;

pub use session_event::SessionEvent;
