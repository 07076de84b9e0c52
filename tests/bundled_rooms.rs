mod common;

use common::{lucky, solve};
use escape_room::puzzle::{Difficulty, PuzzleKind};
use escape_room::session::{HintUse, ItemKind, Rejection};
use escape_room::{ContentError, Outcome, RoomCatalog};
use std::path::Path;

fn catalog() -> RoomCatalog {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("rooms");
    RoomCatalog::load(&dir).expect("bundled rooms should load")
}

#[test]
fn bundled_rooms_load_and_index_by_slug() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 2);

    let lab = catalog.by_slug("lost-laboratory").unwrap();
    assert_eq!(lab.sub_rooms.len(), 2);
    assert_eq!(lab.meta.time_limit_seconds, 900);
    assert_eq!(lab.hotspot_total(), 8);

    let mansion = catalog.by_slug("cursed-mansion").unwrap();
    assert_eq!(mansion.meta.exit_key.as_deref(), Some("escape_key"));
    let clock = &mansion.sub_rooms[0].hotspots[3];
    assert_eq!(clock.stages()[0].kind, PuzzleKind::Clock);
    assert_eq!(clock.requires.len(), 3);

    assert_eq!(catalog.by_difficulty(Difficulty::Hard).len(), 1);
    assert_eq!(
        catalog.by_slug("haunted-attic").unwrap_err(),
        ContentError::UnknownRoom("haunted-attic".to_string())
    );
}

#[test]
fn laboratory_plays_through_both_labs() {
    let mut session = lucky(catalog().by_slug("lost-laboratory").unwrap());

    let refused = session.investigate("door").unwrap();
    assert!(refused.events.iter().any(|e| matches!(
        e,
        escape_room::Event::Notification { message, .. } if message.contains("Storage room key")
    )));

    for hotspot in ["desk", "safe", "cabinet", "clock"] {
        solve(&mut session, hotspot);
    }
    assert_eq!(session.snapshot().current_sub_room, 0);
    solve(&mut session, "door");
    assert!(session.snapshot().in_transition);

    let entered = session.finish_transition().snapshot;
    assert_eq!(entered.current_sub_room, 1);
    assert!(!entered.hotspot("exit").unwrap().accessible);

    solve(&mut session, "shelf");
    solve(&mut session, "equipment");
    assert_eq!(session.outcome(), Outcome::InProgress);
    solve(&mut session, "exit");

    let last = session.snapshot();
    assert_eq!(last.outcome, Outcome::Escaped);
    assert_eq!(last.remaining_seconds, 900);
    assert!(last.sub_rooms.iter().all(|s| s.is_cleared()));
    assert!(last.holds("final_key"));
}

#[test]
fn mansion_collects_three_keys_and_keeps_its_pages() {
    let mut session = lucky(catalog().by_slug("cursed-mansion").unwrap());

    session.investigate("bookshelf").unwrap();
    assert_eq!(
        session.use_hint("bookshelf").unwrap().result,
        HintUse::Rejected(Rejection::NoHint)
    );
    session.dismiss();

    for hotspot in ["bookshelf", "desk", "portrait"] {
        solve(&mut session, hotspot);
    }
    let snapshot = session.snapshot();
    assert!(snapshot.hotspot("clock").unwrap().accessible);
    let pages = snapshot
        .inventory
        .iter()
        .filter(|e| e.kind == ItemKind::Page)
        .count();
    assert_eq!(pages, 4);

    solve(&mut session, "clock");
    assert_eq!(session.outcome(), Outcome::Escaped);
    assert!(session.snapshot().holds("escape_key"));
}
