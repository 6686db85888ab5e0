pub mod error;
pub mod clock;
pub mod document;
pub mod store;
pub mod session;

pub use document::{Configuration, Draft, DraftEvent, DraftSchedule, Event, Schedule};
pub use error::{Error, Result};
pub use session::{ConfigSession, SessionState, Snapshot};
pub use store::{ConfigStore, HttpStore, MemoryStore, DEFAULT_URL};
