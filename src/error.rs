use thiserror::Error;

/// Problems in room content. These are bugs in the definition files, not
/// player actions, so they surface as hard errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// No room in the catalog carries this slug.
    #[error("room not found: {0}")]
    UnknownRoom(String),

    /// Two rooms in one catalog share a slug.
    #[error("duplicate room slug: {0}")]
    DuplicateSlug(String),

    /// A room must contain at least one sub-room.
    #[error("room {0} has no sub-rooms")]
    EmptyRoom(String),

    /// A sub-room without hotspots could never be cleared.
    #[error("sub-room {sub_room} of room {room} has no hotspots")]
    EmptySubRoom { room: String, sub_room: String },

    #[error("duplicate hotspot {hotspot} in sub-room {sub_room} of room {room}")]
    DuplicateHotspot {
        room: String,
        sub_room: String,
        hotspot: String,
    },

    #[error("hotspot {hotspot} in room {room} has no puzzles")]
    NoPuzzles { room: String, hotspot: String },

    /// A reward or requirement id that a kept puzzle page also uses.
    #[error("item id {id} in room {room} clashes with a page of hotspot {hotspot}")]
    PageIdClash {
        room: String,
        hotspot: String,
        id: String,
    },

    /// A `[meta]` or `[rules]` value outside its valid range.
    #[error("invalid {field} in room {room}: {reason}")]
    InvalidRule {
        room: String,
        field: &'static str,
        reason: String,
    },
}

/// Hard errors raised by a running session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The id does not name a hotspot of the current sub-room.
    #[error("unknown hotspot {hotspot} in sub-room {sub_room}")]
    UnknownHotspot { sub_room: usize, hotspot: String },
}
