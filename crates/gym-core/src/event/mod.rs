//! Registro de eventos de la sesión y trait SessionLog.

mod store;
mod types;

pub use store::{InMemorySessionLog, SessionLog};
pub use types::{SessionEvent, SessionEventKind};
