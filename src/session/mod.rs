//! The room session engine.
//!
//! A [`SessionHandle`] owns everything one play-through needs: the room
//! definition, solved flags, inventory, the countdown and pending timers.
//! Presentation forwards player intents to it and renders the [`Snapshot`]
//! and [`Event`]s that come back. Each call runs to completion against
//! `&mut self`, so no intent ever sees another half-applied.
//!
//! Once the outcome is escaped or timed out every intent is a silent no-op
//! that returns the unchanged snapshot.

pub mod clock;
pub mod discovery;
pub mod events;
pub mod gating;
pub mod inventory;
pub mod progress;
pub mod snapshot;
pub mod timers;

pub use clock::{ClockState, SessionClock};
pub use discovery::{DiscoverySource, RandomDiscovery, ScriptedDiscovery};
pub use events::{Event, HintUse, Investigation, Rejection, Severity, Step, Submission, Tick};
pub use inventory::{Inventory, InventoryEntry, ItemKind};
pub use snapshot::{HotspotView, Outcome, SessionStats, Snapshot, SubRoomProgress};
pub use timers::{TimerId, Timers};

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ContentError, SessionError};
use crate::puzzle::{HotspotDefinition, PuzzleDefinition, RoomDefinition, SubRoomDefinition};
use progress::SubRoomState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    EnterSubRoom(usize),
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    next: usize,
    timer: TimerId,
}

#[derive(Debug, Clone)]
struct SessionState {
    sub_rooms: Vec<SubRoomState>,
    current: usize,
    inventory: Inventory,
    outcome: Outcome,
    /// Index of the open hotspot in the current sub-room.
    active: Option<usize>,
    transition: Option<Transition>,
    stats: SessionStats,
}

enum Access {
    Open(usize),
    Refused(Rejection),
}

/// The puzzle currently on screen.
#[derive(Debug, Clone, Copy)]
pub struct ActivePuzzle<'a> {
    pub hotspot: &'a HotspotDefinition,
    pub puzzle: &'a PuzzleDefinition,
    pub stage: usize,
    pub stages: usize,
    pub hint_taken: bool,
}

pub struct SessionHandle {
    room: Arc<RoomDefinition>,
    state: SessionState,
    clock: SessionClock,
    timers: Timers<SessionTimer>,
    discovery: Box<dyn DiscoverySource>,
}

/// Starts a session with an entropy-seeded discovery roll.
pub fn start_session(room: Arc<RoomDefinition>) -> Result<SessionHandle, ContentError> {
    SessionHandle::new(room, RandomDiscovery::from_entropy())
}

impl SessionHandle {
    /// Validates the room first; a session never runs on broken content.
    pub fn new(
        room: Arc<RoomDefinition>,
        discovery: impl DiscoverySource + 'static,
    ) -> Result<Self, ContentError> {
        room.validate()?;
        let state = SessionState {
            sub_rooms: room.sub_rooms.iter().map(SubRoomState::new).collect(),
            current: 0,
            inventory: Inventory::default(),
            outcome: Outcome::InProgress,
            active: None,
            transition: None,
            stats: SessionStats::default(),
        };
        debug!(
            "session for {} created with {}s on the clock",
            room.slug(),
            room.meta.time_limit_seconds
        );

        Ok(SessionHandle {
            clock: SessionClock::new(room.meta.time_limit_seconds),
            room,
            state,
            timers: Timers::new(),
            discovery: Box::new(discovery),
        })
    }

    pub fn room(&self) -> &RoomDefinition {
        &self.room
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn current_sub_room(&self) -> &SubRoomDefinition {
        &self.room.sub_rooms[self.state.current]
    }

    pub fn is_accessible(&self, hotspot_id: &str) -> Result<bool, SessionError> {
        let index = self.locate(hotspot_id)?;
        let hotspot = &self.current_sub_room().hotspots[index];
        Ok(gating::is_accessible(&hotspot.requires, &self.state.inventory))
    }

    pub fn active_puzzle(&self) -> Option<ActivePuzzle<'_>> {
        let index = self.state.active?;
        let hotspot = &self.current_sub_room().hotspots[index];
        let state = &self.state.sub_rooms[self.state.current].hotspots[index];
        let stage = state.stage();
        Some(ActivePuzzle {
            hotspot,
            puzzle: hotspot.stages().get(stage)?,
            stage,
            stages: hotspot.stage_count(),
            hint_taken: state.hinted.contains(&stage),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        let room = &self.room;
        let current = self.state.current;
        let inventory = &self.state.inventory;

        let hotspots = room.sub_rooms[current]
            .hotspots
            .iter()
            .zip(&self.state.sub_rooms[current].hotspots)
            .map(|(definition, state)| HotspotView {
                id: definition.id.clone(),
                name: definition.name.clone(),
                solved: state.solved,
                accessible: gating::is_accessible(&definition.requires, inventory),
                stage: state.progress,
                stages: definition.stage_count(),
            })
            .collect();

        let sub_rooms = room
            .sub_rooms
            .iter()
            .zip(&self.state.sub_rooms)
            .map(|(definition, state)| SubRoomProgress {
                name: definition.name.clone(),
                solved: state.solved_count(),
                total: definition.hotspots.len(),
            })
            .collect();

        Snapshot {
            room: room.slug().to_string(),
            current_sub_room: current,
            hotspots,
            sub_rooms,
            inventory: inventory.entries().to_vec(),
            remaining_seconds: self.clock.remaining(),
            outcome: self.state.outcome,
            clock: self.clock.state(),
            active: self
                .state
                .active
                .map(|i| room.sub_rooms[current].hotspots[i].id.clone()),
            in_transition: self.state.transition.is_some(),
            stats: self.state.stats,
        }
    }

    /// Leaves the room introduction and starts the countdown.
    pub fn begin(&mut self) -> Step<bool> {
        if self.state.outcome.is_terminal() {
            return self.step(false, Vec::new());
        }
        let mut events = Vec::new();
        let started = self.clock.start();
        if started {
            info!("{}: clock started at {}s", self.room.slug(), self.clock.remaining());
            if self.clock.is_expired() {
                self.time_out(&mut events);
            }
        }
        self.step(started, events)
    }

    pub fn investigate(&mut self, hotspot_id: &str) -> Result<Step<Investigation>, SessionError> {
        let index = match self.open(hotspot_id)? {
            Access::Open(index) => index,
            Access::Refused(rejection) => {
                return Ok(self.refuse(hotspot_id, rejection, Investigation::Rejected))
            }
        };
        let room = Arc::clone(&self.room);
        let hotspot = &room.sub_rooms[self.state.current].hotspots[index];
        let mut events = Vec::new();

        if self.is_exit(hotspot, index) {
            info!("{}: left through {}", room.slug(), hotspot.id);
            self.escape(&mut events);
            return Ok(self.step(Investigation::Exited, events));
        }

        let (solved, found, stage) = {
            let state = &self.state.sub_rooms[self.state.current].hotspots[index];
            (state.solved, state.is_found(), state.stage())
        };
        if solved {
            return Ok(self.refuse(hotspot_id, Rejection::AlreadySolved, Investigation::Rejected));
        }

        self.state.stats.investigations += 1;
        let stages = hotspot.stage_count();
        if found {
            self.state.active = Some(index);
            return Ok(self.step(Investigation::Reopened { stage, stages }, events));
        }

        self.state.stats.discovery_rolls += 1;
        if self.discovery.discover(room.rules.discovery_chance) {
            self.state.sub_rooms[self.state.current].hotspots[index].discover();
            self.state.active = Some(index);
            debug!("{}: found the puzzle in {}", room.slug(), hotspot.id);
            Ok(self.step(Investigation::Found { stage: 0, stages }, events))
        } else {
            self.state.stats.misses += 1;
            let penalty = room.rules.miss_penalty_seconds;
            events.push(Event::warning(format!(
                "You searched the {} but found nothing. -{} seconds.",
                hotspot.name, penalty
            )));
            let taken = self.penalize(penalty, &mut events);
            debug!("{}: nothing found in {}", room.slug(), hotspot.id);
            Ok(self.step(Investigation::NothingFound { penalty: taken }, events))
        }
    }

    pub fn submit_answer(
        &mut self,
        hotspot_id: &str,
        answer: &str,
    ) -> Result<Step<Submission>, SessionError> {
        let index = match self.open(hotspot_id)? {
            Access::Open(index) => index,
            Access::Refused(rejection) => {
                return Ok(self.refuse(hotspot_id, rejection, Submission::Rejected))
            }
        };
        if let Some(rejection) = self.puzzle_closed(index) {
            return Ok(self.refuse(hotspot_id, rejection, Submission::Rejected));
        }

        let room = Arc::clone(&self.room);
        let current = self.state.current;
        let hotspot = &room.sub_rooms[current].hotspots[index];
        let stage = self.state.sub_rooms[current].hotspots[index].stage();
        let stages = hotspot.stage_count();
        let puzzle = &hotspot.stages()[stage];
        let mut events = Vec::new();

        if !puzzle.accepts(answer) {
            self.state.stats.wrong_answers += 1;
            let penalty = room.rules.wrong_answer_penalty_seconds;
            events.push(Event::warning(format!("Wrong answer. -{} seconds.", penalty)));
            let taken = self.penalize(penalty, &mut events);
            debug!("{}: wrong answer at {} stage {}", room.slug(), hotspot.id, stage);
            return Ok(self.step(Submission::Incorrect { penalty: taken }, events));
        }

        if hotspot.keep_pages {
            self.state.inventory.add(InventoryEntry {
                id: hotspot.page_id(stage),
                name: puzzle.question.clone(),
                kind: ItemKind::Page,
            });
        }

        match self.state.sub_rooms[current].hotspots[index].advance(stages) {
            Some(next) => {
                events.push(Event::success(format!(
                    "Puzzle {}/{} solved! On to the next one.",
                    stage + 1,
                    stages
                )));
                debug!("{}: {} advanced to stage {}", room.slug(), hotspot.id, next);
                Ok(self.step(Submission::StageCleared { next, stages }, events))
            }
            None => {
                self.state.active = None;
                match &hotspot.reward {
                    Some(item) => {
                        let name = room.item_name(item);
                        self.state.inventory.add(InventoryEntry {
                            id: item.clone(),
                            name: name.to_string(),
                            kind: ItemKind::Item,
                        });
                        events.push(Event::success(format!("Item acquired: {}", name)));
                    }
                    None => events.push(Event::success(format!("{} solved!", hotspot.name))),
                }
                debug!("{}: solved {}", room.slug(), hotspot.id);
                self.after_solve(&mut events);
                Ok(self.step(
                    Submission::Solved {
                        reward: hotspot.reward.clone(),
                    },
                    events,
                ))
            }
        }
    }

    pub fn use_hint(&mut self, hotspot_id: &str) -> Result<Step<HintUse>, SessionError> {
        let index = match self.open(hotspot_id)? {
            Access::Open(index) => index,
            Access::Refused(rejection) => {
                return Ok(self.refuse(hotspot_id, rejection, HintUse::Rejected))
            }
        };
        if let Some(rejection) = self.puzzle_closed(index) {
            return Ok(self.refuse(hotspot_id, rejection, HintUse::Rejected));
        }

        let room = Arc::clone(&self.room);
        let current = self.state.current;
        let hotspot = &room.sub_rooms[current].hotspots[index];
        let state = &mut self.state.sub_rooms[current].hotspots[index];
        let hint = &hotspot.stages()[state.stage()].hint;
        if hint.trim().is_empty() {
            return Ok(self.refuse(hotspot_id, Rejection::NoHint, HintUse::Rejected));
        }

        let mut events = Vec::new();
        let mut taken = 0;
        if state.take_hint() {
            self.state.stats.hints_used += 1;
            let penalty = room.rules.hint_penalty_seconds;
            events.push(Event::warning(format!("Hint used. -{} seconds.", penalty)));
            taken = self.penalize(penalty, &mut events);
        }
        Ok(self.step(
            HintUse::Revealed {
                hint: hint.clone(),
                penalty: taken,
            },
            events,
        ))
    }

    /// Closes the open puzzle without touching its progress.
    pub fn dismiss(&mut self) -> Step<bool> {
        if self.state.outcome.is_terminal() {
            return self.step(false, Vec::new());
        }
        let closed = self.state.active.take().is_some();
        debug!("{}: dismissed, puzzle was open: {}", self.room.slug(), closed);
        self.step(closed, Vec::new())
    }

    /// One real-time second.
    pub fn tick(&mut self) -> Step<Tick> {
        if self.state.outcome.is_terminal() {
            return self.step(Tick::Stopped, Vec::new());
        }
        if !self.clock.tick() {
            debug!("{}: tick while {:?}", self.room.slug(), self.clock.state());
            return self.step(Tick::Paused, Vec::new());
        }
        self.state.stats.elapsed_seconds += 1;
        debug!("{}: tick, {}s left", self.room.slug(), self.clock.remaining());

        let mut events = Vec::new();
        if self.clock.is_expired() {
            self.time_out(&mut events);
            return self.step(Tick::Expired, events);
        }
        let remaining = self.clock.remaining();
        self.step(Tick::Counted { remaining }, events)
    }

    /// Feeds wall-clock time to the session's timers. Returns how many fired.
    pub fn advance(&mut self, elapsed: Duration) -> Step<usize> {
        if self.state.outcome.is_terminal() {
            return self.step(0, Vec::new());
        }
        let mut events = Vec::new();
        let fired = self.timers.advance(elapsed);
        debug!(
            "{}: advanced {:?}, {} timers fired",
            self.room.slug(),
            elapsed,
            fired.len()
        );
        for timer in &fired {
            match *timer {
                SessionTimer::EnterSubRoom(next) => self.enter_sub_room(next, &mut events),
            }
        }
        self.step(fired.len(), events)
    }

    /// Completes a pending sub-room transition without waiting for its delay.
    pub fn finish_transition(&mut self) -> Step<bool> {
        let pending = match self.state.transition {
            Some(transition) if !self.state.outcome.is_terminal() => transition,
            _ => return self.step(false, Vec::new()),
        };
        self.timers.cancel(pending.timer);
        let mut events = Vec::new();
        self.enter_sub_room(pending.next, &mut events);
        self.step(true, events)
    }

    /// Tears the session down, releasing its timers.
    pub fn close(mut self) -> Snapshot {
        let cancelled = self.timers.cancel_all();
        self.clock.stop();
        debug!("{}: session closed, {} timers cancelled", self.room.slug(), cancelled);
        self.snapshot()
    }

    fn step<T>(&self, result: T, events: Vec<Event>) -> Step<T> {
        Step {
            result,
            snapshot: self.snapshot(),
            events,
        }
    }

    fn locate(&self, hotspot_id: &str) -> Result<usize, SessionError> {
        self.current_sub_room()
            .hotspots
            .iter()
            .position(|h| h.id == hotspot_id)
            .ok_or_else(|| SessionError::UnknownHotspot {
                sub_room: self.state.current,
                hotspot: hotspot_id.to_string(),
            })
    }

    /// Checks shared by every hotspot intent, up to and including gating.
    fn open(&self, hotspot_id: &str) -> Result<Access, SessionError> {
        if self.state.outcome.is_terminal() {
            return Ok(Access::Refused(Rejection::Terminal));
        }
        let index = self.locate(hotspot_id)?;
        if self.clock.state() == ClockState::Intro {
            return Ok(Access::Refused(Rejection::NotStarted));
        }
        if self.state.transition.is_some() {
            return Ok(Access::Refused(Rejection::InTransition));
        }

        let hotspot = &self.current_sub_room().hotspots[index];
        let missing = gating::missing_items(&hotspot.requires, &self.state.inventory);
        if !missing.is_empty() {
            let missing = missing
                .into_iter()
                .map(|id| self.room.item_name(id).to_string())
                .collect();
            return Ok(Access::Refused(Rejection::NotAccessible { missing }));
        }
        Ok(Access::Open(index))
    }

    fn puzzle_closed(&self, index: usize) -> Option<Rejection> {
        let state = &self.state.sub_rooms[self.state.current].hotspots[index];
        if state.solved {
            Some(Rejection::AlreadySolved)
        } else if !state.is_found() || self.state.active != Some(index) {
            Some(Rejection::NotDiscovered)
        } else {
            None
        }
    }

    fn refuse<T>(
        &self,
        hotspot_id: &str,
        rejection: Rejection,
        wrap: impl FnOnce(Rejection) -> T,
    ) -> Step<T> {
        let name = self
            .current_sub_room()
            .hotspots
            .iter()
            .find(|h| h.id == hotspot_id)
            .map_or(hotspot_id, |h| h.name.as_str());

        let events = match &rejection {
            Rejection::NotAccessible { missing } => vec![Event::warning(format!(
                "You need more to examine the {}: {}",
                name,
                missing.join(", ")
            ))],
            Rejection::AlreadySolved => vec![Event::warning(format!(
                "You already searched the {}. There is nothing more to find.",
                name
            ))],
            Rejection::NotDiscovered => {
                vec![Event::info(format!("Investigate the {} first.", name))]
            }
            Rejection::NoHint => vec![Event::info("There is no hint for this puzzle.")],
            Rejection::NotStarted | Rejection::InTransition | Rejection::Terminal => Vec::new(),
        };
        if rejection != Rejection::Terminal {
            debug!("{}: {} refused: {:?}", self.room.slug(), hotspot_id, rejection);
        }
        self.step(wrap(rejection), events)
    }

    fn is_exit(&self, hotspot: &HotspotDefinition, index: usize) -> bool {
        let Some(key) = self.room.meta.exit_key.as_deref() else {
            return false;
        };
        hotspot.reward.as_deref() == Some(key)
            && self.state.sub_rooms[self.state.current].hotspots[index].solved
            && self.state.inventory.holds(key)
    }

    fn penalize(&mut self, seconds: u32, events: &mut Vec<Event>) -> u32 {
        let taken = self.clock.penalize(seconds);
        self.state.stats.penalty_seconds += taken;
        if self.clock.is_expired() && !self.state.outcome.is_terminal() {
            self.time_out(events);
        }
        taken
    }

    fn after_solve(&mut self, events: &mut Vec<Event>) {
        let current = self.state.current;
        if !self.state.sub_rooms[current].is_cleared() {
            return;
        }
        if self.room.is_last_sub_room(current) {
            info!("{}: every hotspot solved", self.room.slug());
            self.escape(events);
            return;
        }

        let name = self.room.sub_rooms[current].name.clone();
        info!("{}: cleared sub-room {}", self.room.slug(), name);
        events.push(Event::SubRoomCleared {
            sub_room: current,
            name: name.clone(),
        });
        events.push(Event::success(format!(
            "{} cleared! Moving to the next room...",
            name
        )));

        self.clock.suspend();
        let next = current + 1;
        let delay = Duration::from_millis(self.room.rules.transition_delay_ms);
        let timer = self.timers.schedule(SessionTimer::EnterSubRoom(next), delay);
        self.state.transition = Some(Transition { next, timer });
    }

    fn enter_sub_room(&mut self, next: usize, events: &mut Vec<Event>) {
        match self.state.transition {
            Some(transition) if transition.next == next => {}
            _ => return,
        }
        self.state.transition = None;
        self.state.current = next;
        self.state.active = None;
        self.clock.resume();

        let name = &self.room.sub_rooms[next].name;
        info!("{}: entered sub-room {}", self.room.slug(), name);
        events.push(Event::info(format!("You enter {}.", name)));
    }

    fn escape(&mut self, events: &mut Vec<Event>) {
        self.finish(Outcome::Escaped);
        info!(
            "{}: escaped with {}s left",
            self.room.slug(),
            self.clock.remaining()
        );
        events.push(Event::Escaped);
    }

    fn time_out(&mut self, events: &mut Vec<Event>) {
        self.finish(Outcome::TimedOut);
        info!("{}: time ran out", self.room.slug());
        events.push(Event::TimedOut);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.outcome = outcome;
        self.state.active = None;
        self.state.transition = None;
        self.clock.stop();
        self.timers.cancel_all();
    }
}
