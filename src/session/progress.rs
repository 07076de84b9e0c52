use std::collections::BTreeSet;

use crate::puzzle::SubRoomDefinition;

/// Live state of one hotspot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotspotState {
    pub solved: bool,
    /// Index of the open stage. Set on discovery, cleared on solve.
    pub progress: Option<usize>,
    /// Stages whose hint has been paid for.
    pub hinted: BTreeSet<usize>,
}

impl HotspotState {
    pub fn is_found(&self) -> bool {
        self.progress.is_some()
    }

    pub fn stage(&self) -> usize {
        self.progress.unwrap_or(0)
    }

    pub fn discover(&mut self) {
        if !self.solved && self.progress.is_none() {
            self.progress = Some(0);
        }
    }

    /// Records a correct answer to the open stage out of `stages`.
    /// Returns the next stage, or `None` when that was the last one.
    pub fn advance(&mut self, stages: usize) -> Option<usize> {
        let next = self.stage() + 1;
        if next < stages {
            self.progress = Some(next);
            Some(next)
        } else {
            self.solved = true;
            self.progress = None;
            None
        }
    }

    /// Returns true the first time a stage's hint is taken.
    pub fn take_hint(&mut self) -> bool {
        let stage = self.stage();
        self.hinted.insert(stage)
    }
}

/// Solved flags of one sub-room, index-aligned with its definition. Kept
/// for the whole session so cumulative progress stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRoomState {
    pub hotspots: Vec<HotspotState>,
}

impl SubRoomState {
    pub fn new(definition: &SubRoomDefinition) -> Self {
        SubRoomState {
            hotspots: vec![HotspotState::default(); definition.hotspots.len()],
        }
    }

    pub fn solved_count(&self) -> usize {
        self.hotspots.iter().filter(|h| h.solved).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.hotspots.iter().all(|h| h.solved)
    }
}
