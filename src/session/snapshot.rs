use super::clock::ClockState;
use super::inventory::InventoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Escaped,
    TimedOut,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub investigations: u32,
    pub discovery_rolls: u32,
    pub misses: u32,
    pub wrong_answers: u32,
    pub hints_used: u32,
    pub penalty_seconds: u32,
    /// Seconds actually ticked off, penalties excluded.
    pub elapsed_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotspotView {
    pub id: String,
    pub name: String,
    pub solved: bool,
    pub accessible: bool,
    /// Open stage while in progress; `None` before discovery and once solved.
    pub stage: Option<usize>,
    pub stages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRoomProgress {
    pub name: String,
    pub solved: usize,
    pub total: usize,
}

impl SubRoomProgress {
    pub fn is_cleared(&self) -> bool {
        self.solved == self.total
    }
}

/// Read-only projection of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub room: String,
    pub current_sub_room: usize,
    /// Hotspots of the current sub-room.
    pub hotspots: Vec<HotspotView>,
    /// Every sub-room, including cleared ones.
    pub sub_rooms: Vec<SubRoomProgress>,
    pub inventory: Vec<InventoryEntry>,
    pub remaining_seconds: u32,
    pub outcome: Outcome,
    pub clock: ClockState,
    /// Hotspot whose puzzle is on screen.
    pub active: Option<String>,
    pub in_transition: bool,
    pub stats: SessionStats,
}

impl Snapshot {
    pub fn hotspot(&self, id: &str) -> Option<&HotspotView> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn holds(&self, item: &str) -> bool {
        self.inventory.iter().any(|e| e.id == item)
    }

    pub fn solved_total(&self) -> usize {
        self.sub_rooms.iter().map(|s| s.solved).sum()
    }

    pub fn hotspot_total(&self) -> usize {
        self.sub_rooms.iter().map(|s| s.total).sum()
    }
}
