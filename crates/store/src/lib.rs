//! Session storage: live runs keyed by id, persisted through a swappable
//! backend. File IO happens only when a flush writes the saves.

pub mod backend;
pub mod error;
pub mod flusher;
pub mod session;

pub use backend::*;
pub use error::*;
pub use flusher::*;
pub use session::*;
