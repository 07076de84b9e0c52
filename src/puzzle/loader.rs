use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use super::types::RoomDefinition;

pub fn parse_room(content: &str) -> Result<RoomDefinition> {
    let room: RoomDefinition = toml::from_str(content)?;
    room.validate()?;

    if let Some(key) = &room.meta.exit_key {
        let granted = room
            .sub_rooms
            .iter()
            .flat_map(|s| &s.hotspots)
            .any(|h| h.reward.as_deref() == Some(key.as_str()));
        if !granted {
            warn!("room {}: exit key {} is not granted by any hotspot", room.slug(), key);
        }
    }

    Ok(room)
}

pub fn load_room(path: &Path) -> Result<RoomDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading room file {}", path.display()))?;
    let room = parse_room(&content).with_context(|| format!("loading {}", path.display()))?;
    debug!("loaded room {} from {}", room.slug(), path.display());
    Ok(room)
}

pub fn load_rooms(room_dir: &Path) -> Result<Vec<RoomDefinition>> {
    let pattern = room_dir.join("*.toml");
    let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|e| e.ok())
        .collect();

    // Sort by filename so the menu order is stable
    paths.sort();

    let mut rooms = Vec::new();
    for path in paths {
        rooms.push(load_room(&path)?);
    }

    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::puzzle::PuzzleSet;
    use tempfile::TempDir;

    const STUDY: &str = r#"
[meta]
id = "9"
slug = "study"
title = "Study"
story = "Dusty."
time_limit_seconds = 120

[[item]]
id = "brass_key"
name = "Brass key"

[[sub_room]]
id = "study"
name = "The study"

[[sub_room.hotspot]]
id = "desk"
name = "Desk"
reward = "brass_key"
region = { x = 30.0, y = 60.0, w = 40.0, h = 30.0 }

[sub_room.hotspot.puzzle]
kind = "code"
question = "Read it backwards"
answer = "EVIL"

[[sub_room.hotspot]]
id = "shelf"
name = "Shelf"
requires = ["brass_key"]
keep_pages = true

[[sub_room.hotspot.puzzle]]
question = "one"
answer = "1"

[[sub_room.hotspot.puzzle]]
question = "two"
answer = "2"
hint = "count"
"#;

    #[test]
    fn parses_single_and_sequence_puzzles() {
        let room = parse_room(STUDY).unwrap();
        assert_eq!(room.slug(), "study");
        assert_eq!(room.rules, crate::puzzle::Rules::default());

        let hotspots = &room.sub_rooms[0].hotspots;
        assert!(matches!(hotspots[0].puzzle, PuzzleSet::Single(_)));
        assert_eq!(hotspots[0].stage_count(), 1);
        assert_eq!(hotspots[0].region.w, 40.0);
        assert!(matches!(hotspots[1].puzzle, PuzzleSet::Sequence(_)));
        assert_eq!(hotspots[1].stage_count(), 2);
        assert_eq!(hotspots[1].requires, vec!["brass_key".to_string()]);
        assert!(hotspots[1].keep_pages);
        assert_eq!(room.item_name("brass_key"), "Brass key");
        assert_eq!(room.item_name("unlisted"), "unlisted");
    }

    #[test]
    fn rules_table_overrides_defaults() {
        let content = STUDY.replace(
            "[[item]]",
            "[rules]\nmiss_penalty_seconds = 5\ndiscovery_chance = 1.0\n\n[[item]]",
        );
        let room = parse_room(&content).unwrap();
        assert_eq!(room.rules.miss_penalty_seconds, 5);
        assert_eq!(room.rules.discovery_chance, 1.0);
        assert_eq!(room.rules.wrong_answer_penalty_seconds, 30);
    }

    #[test]
    fn rejects_duplicate_hotspot_ids() {
        let content = STUDY.replace("id = \"shelf\"", "id = \"desk\"");
        let err = parse_room(&content).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ContentError>(),
                Some(ContentError::DuplicateHotspot { .. })
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_rewards_named_like_kept_pages() {
        let content = STUDY.replace("reward = \"brass_key\"", "reward = \"shelf-1\"");
        let err = parse_room(&content).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::PageIdClash { id, .. }) if id == "shelf-1"
        ));
    }

    #[test]
    fn rejects_out_of_range_discovery_chance() {
        let content = STUDY.replace("[[item]]", "[rules]\ndiscovery_chance = 1.5\n\n[[item]]");
        let err = parse_room(&content).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::InvalidRule { field: "discovery_chance", .. })
        ));
    }

    #[test]
    fn loads_toml_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        let second = STUDY.replace("slug = \"study\"", "slug = \"attic\"");
        std::fs::write(dir.path().join("b_attic.toml"), second).unwrap();
        std::fs::write(dir.path().join("a_study.toml"), STUDY).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a room").unwrap();

        let rooms = load_rooms(dir.path()).unwrap();
        let slugs: Vec<_> = rooms.iter().map(|r| r.slug()).collect();
        assert_eq!(slugs, vec!["study", "attic"]);
    }

    #[test]
    fn load_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[meta]\nid = 1").unwrap();
        let err = load_room(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
