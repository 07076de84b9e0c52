use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use super::loader::load_rooms;
use super::types::{Difficulty, RoomDefinition};
use crate::error::ContentError;

/// Every playable room, keyed by slug. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Arc<RoomDefinition>>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomDefinition>) -> Result<Self, ContentError> {
        let mut catalog = RoomCatalog::default();
        for room in rooms {
            if catalog.rooms.iter().any(|r| r.slug() == room.slug()) {
                return Err(ContentError::DuplicateSlug(room.meta.slug));
            }
            catalog.rooms.push(Arc::new(room));
        }
        Ok(catalog)
    }

    pub fn load(room_dir: &Path) -> Result<Self> {
        Ok(Self::new(load_rooms(room_dir)?)?)
    }

    pub fn by_slug(&self, slug: &str) -> Result<Arc<RoomDefinition>, ContentError> {
        self.rooms
            .iter()
            .find(|room| room.slug() == slug)
            .cloned()
            .ok_or_else(|| ContentError::UnknownRoom(slug.to_string()))
    }

    pub fn all(&self) -> &[Arc<RoomDefinition>] {
        &self.rooms
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<Arc<RoomDefinition>> {
        self.rooms
            .iter()
            .filter(|room| room.meta.difficulty == difficulty)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
