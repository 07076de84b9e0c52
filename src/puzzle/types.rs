use serde::Deserialize;
use std::collections::HashSet;

use crate::error::ContentError;

#[derive(Debug, Deserialize, Clone)]
pub struct RoomDefinition {
    pub meta: RoomMeta,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default, rename = "item")]
    pub items: Vec<ItemDefinition>,
    #[serde(rename = "sub_room")]
    pub sub_rooms: Vec<SubRoomDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoomMeta {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub story: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub time_limit_seconds: u32,
    /// Item whose holder may walk out through the hotspot that granted it.
    #[serde(default)]
    pub exit_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tunable session constants. Every field is optional in the room file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Rules {
    pub discovery_chance: f64,
    pub miss_penalty_seconds: u32,
    pub wrong_answer_penalty_seconds: u32,
    pub hint_penalty_seconds: u32,
    pub transition_delay_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            discovery_chance: 0.7,
            miss_penalty_seconds: 20,
            wrong_answer_penalty_seconds: 30,
            hint_penalty_seconds: 60,
            transition_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubRoomDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(rename = "hotspot")]
    pub hotspots: Vec<HotspotDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HotspotDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: ScreenRegion,
    pub puzzle: PuzzleSet,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub reward: Option<String>,
    /// Solved stages leave their question sheet in the inventory.
    #[serde(default)]
    pub keep_pages: bool,
}

/// Percentages of the scene, used by presentation only.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct ScreenRegion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// `[sub_room.hotspot.puzzle]` is a single puzzle,
/// `[[sub_room.hotspot.puzzle]]` an ordered sequence.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum PuzzleSet {
    Single(PuzzleDefinition),
    Sequence(Vec<PuzzleDefinition>),
}

#[derive(Debug, Deserialize, Clone)]
pub struct PuzzleDefinition {
    #[serde(default)]
    pub kind: PuzzleKind,
    pub question: String,
    #[serde(default)]
    pub hint: String,
    pub answer: String,
    #[serde(default)]
    pub media: Option<String>,
}

/// Only changes how the answer is entered. Comparison is the same for all.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    #[default]
    Text,
    Code,
    Pattern,
    Clock,
}

impl PuzzleDefinition {
    /// Trimmed, case-insensitive exact match.
    pub fn accepts(&self, candidate: &str) -> bool {
        candidate.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

impl HotspotDefinition {
    pub fn stages(&self) -> &[PuzzleDefinition] {
        match &self.puzzle {
            PuzzleSet::Single(puzzle) => std::slice::from_ref(puzzle),
            PuzzleSet::Sequence(puzzles) => puzzles,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages().len()
    }

    /// Inventory id of the page kept for `stage`.
    pub fn page_id(&self, stage: usize) -> String {
        format!("{}-{}", self.id, stage)
    }
}

impl RoomDefinition {
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn is_last_sub_room(&self, index: usize) -> bool {
        index + 1 == self.sub_rooms.len()
    }

    /// Display name for an item id, falling back to the id itself.
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.name.as_str())
            .unwrap_or(id)
    }

    pub fn hotspot_total(&self) -> usize {
        self.sub_rooms.iter().map(|s| s.hotspots.len()).sum()
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        let room = &self.meta.slug;
        if self.sub_rooms.is_empty() {
            return Err(ContentError::EmptyRoom(room.clone()));
        }
        if self.meta.time_limit_seconds == 0 {
            return Err(ContentError::InvalidRule {
                room: room.clone(),
                field: "time_limit_seconds",
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.rules.discovery_chance) {
            return Err(ContentError::InvalidRule {
                room: room.clone(),
                field: "discovery_chance",
                reason: format!("{} is not a probability", self.rules.discovery_chance),
            });
        }

        for sub_room in &self.sub_rooms {
            if sub_room.hotspots.is_empty() {
                return Err(ContentError::EmptySubRoom {
                    room: room.clone(),
                    sub_room: sub_room.id.clone(),
                });
            }
            let mut seen = HashSet::new();
            for hotspot in &sub_room.hotspots {
                if !seen.insert(hotspot.id.as_str()) {
                    return Err(ContentError::DuplicateHotspot {
                        room: room.clone(),
                        sub_room: sub_room.id.clone(),
                        hotspot: hotspot.id.clone(),
                    });
                }
                if hotspot.stages().is_empty() {
                    return Err(ContentError::NoPuzzles {
                        room: room.clone(),
                        hotspot: hotspot.id.clone(),
                    });
                }
            }
        }

        self.check_page_ids()
    }

    /// Pages share the inventory with real items, so no reward or
    /// requirement may reuse a page id.
    fn check_page_ids(&self) -> Result<(), ContentError> {
        let hotspots: Vec<&HotspotDefinition> =
            self.sub_rooms.iter().flat_map(|s| &s.hotspots).collect();
        let item_ids: HashSet<&str> = hotspots
            .iter()
            .flat_map(|h| h.reward.iter().chain(&h.requires))
            .map(String::as_str)
            .collect();

        for hotspot in hotspots.iter().filter(|h| h.keep_pages) {
            for stage in 0..hotspot.stage_count() {
                let id = hotspot.page_id(stage);
                if item_ids.contains(id.as_str()) {
                    return Err(ContentError::PageIdClash {
                        room: self.meta.slug.clone(),
                        hotspot: hotspot.id.clone(),
                        id,
                    });
                }
            }
        }
        Ok(())
    }
}
