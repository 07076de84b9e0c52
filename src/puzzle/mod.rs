pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::RoomCatalog;
pub use loader::{load_room, load_rooms, parse_room};
pub use types::{
    Difficulty, HotspotDefinition, ItemDefinition, PuzzleDefinition, PuzzleKind, PuzzleSet,
    RoomDefinition, RoomMeta, Rules, ScreenRegion, SubRoomDefinition,
};
