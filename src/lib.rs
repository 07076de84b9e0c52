//! Escape Room: a point-and-click escape game engine.
//!
//! Players explore a room made of sub-rooms, investigate hotspots, solve
//! puzzles to earn items that unlock further hotspots, and race a countdown.
//!
//! # Architecture
//!
//! - `puzzle` - room definitions loaded from TOML, and the room catalog
//! - `session` - the live session engine: discovery, gating, progression,
//!   clock and timers
//! - `error` - content and session error types

pub mod error;
pub mod puzzle;
pub mod session;

pub use error::{ContentError, SessionError};
pub use puzzle::{RoomCatalog, RoomDefinition};
pub use session::{start_session, Event, Outcome, SessionHandle, Snapshot, Step};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
