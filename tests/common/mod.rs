#![allow(dead_code)]

use escape_room::puzzle::parse_room;
use escape_room::session::{DiscoverySource, ScriptedDiscovery, SessionHandle};
use escape_room::RoomDefinition;
use std::sync::Arc;

pub fn room(content: &str) -> Arc<RoomDefinition> {
    Arc::new(parse_room(content).expect("test room should parse"))
}

/// One sub-room, one single-stage hotspot answering "5".
pub fn one_box_room(time_limit: u32) -> Arc<RoomDefinition> {
    room(&format!(
        r#"
[meta]
id = "a"
slug = "one-box"
title = "One box"
story = ""
time_limit_seconds = {time_limit}

[[item]]
id = "gem"
name = "Green gem"

[[sub_room]]
id = "only"
name = "Box room"

[[sub_room.hotspot]]
id = "box"
name = "box"
reward = "gem"

[sub_room.hotspot.puzzle]
question = "2 + 3?"
answer = "5"
hint = "add them"
"#
    ))
}

/// Two sub-rooms with one hotspot each.
pub fn two_stage_room() -> Arc<RoomDefinition> {
    room(
        r#"
[meta]
id = "e"
slug = "corridor"
title = "Corridor"
story = ""
time_limit_seconds = 300

[[sub_room]]
id = "first"
name = "First room"

[[sub_room.hotspot]]
id = "door"
name = "door"

[sub_room.hotspot.puzzle]
question = "?"
answer = "open"

[[sub_room]]
id = "second"
name = "Second room"

[[sub_room.hotspot]]
id = "hatch"
name = "hatch"

[sub_room.hotspot.puzzle]
question = "?"
answer = "up"
"#,
    )
}

/// A study whose locked cabinet needs the desk's key, a three-stage
/// bookshelf that keeps its pages, and a clock exit.
pub fn study_room() -> Arc<RoomDefinition> {
    room(
        r#"
[meta]
id = "s"
slug = "study"
title = "Study"
story = ""
time_limit_seconds = 600
exit_key = "escape_key"

[[item]]
id = "key1"
name = "Lab key"

[[item]]
id = "escape_key"
name = "Escape key"

[[sub_room]]
id = "study"
name = "Study"

[[sub_room.hotspot]]
id = "desk"
name = "desk"
reward = "key1"

[sub_room.hotspot.puzzle]
question = "Read it backwards: LIVE"
answer = "EVIL"
hint = "mirror"

[[sub_room.hotspot]]
id = "cabinet"
name = "cabinet"
requires = ["key1"]

[sub_room.hotspot.puzzle]
question = "Say the word"
answer = "open"

[[sub_room.hotspot]]
id = "bookshelf"
name = "bookshelf"
reward = "book"
keep_pages = true

[[sub_room.hotspot.puzzle]]
question = "first"
answer = "1"
hint = "one"

[[sub_room.hotspot.puzzle]]
question = "second"
answer = "2"
hint = "two"

[[sub_room.hotspot.puzzle]]
question = "third"
answer = "3"

[[sub_room.hotspot]]
id = "clock"
name = "clock"
requires = ["key1"]
reward = "escape_key"

[sub_room.hotspot.puzzle]
kind = "clock"
question = "Set the time"
answer = "1035"
"#,
    )
}

pub fn started(room: Arc<RoomDefinition>, discovery: impl DiscoverySource + 'static) -> SessionHandle {
    let mut session = SessionHandle::new(room, discovery).expect("test room should validate");
    session.begin();
    session
}

/// Started session whose discovery rolls always succeed.
pub fn lucky(room: Arc<RoomDefinition>) -> SessionHandle {
    started(room, ScriptedDiscovery::always(true))
}

/// Investigates and answers every stage of a hotspot correctly.
pub fn solve(session: &mut SessionHandle, hotspot: &str) {
    session.investigate(hotspot).expect("known hotspot");
    loop {
        let answer = session
            .active_puzzle()
            .expect("puzzle should be open")
            .puzzle
            .answer
            .clone();
        let step = session.submit_answer(hotspot, &answer).expect("known hotspot");
        assert!(step.result.is_correct(), "{hotspot}: {:?}", step.result);
        if step.result.completed_hotspot() {
            break;
        }
    }
}
