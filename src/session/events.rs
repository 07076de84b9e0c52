use std::time::Duration;

use super::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    /// How long presentation keeps a notice on screen.
    pub fn dismiss_after(self) -> Duration {
        match self {
            Severity::Warning => Duration::from_secs(3),
            Severity::Info | Severity::Success => Duration::from_secs(2),
        }
    }
}

/// Things presentation should react to, emitted alongside each snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Notification { message: String, severity: Severity },
    SubRoomCleared { sub_room: usize, name: String },
    Escaped,
    TimedOut,
}

impl Event {
    pub fn info(message: impl Into<String>) -> Self {
        Event::Notification {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Event::Notification {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Event::Notification {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Escaped | Event::TimedOut)
    }
}

/// Why an intent was refused. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Required items are missing; carries their display names.
    NotAccessible { missing: Vec<String> },
    AlreadySolved,
    /// Answers and hints need the hotspot's puzzle to be open.
    NotDiscovered,
    /// The room introduction is still showing.
    NotStarted,
    /// The next sub-room is being brought in.
    InTransition,
    NoHint,
    /// The session already ended. Always silent.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Investigation {
    /// The roll succeeded and `stage` of `stages` is now open.
    Found { stage: usize, stages: usize },
    /// Already found earlier; reopened without a roll.
    Reopened { stage: usize, stages: usize },
    NothingFound { penalty: u32 },
    /// The exit hotspot was used with its key in hand.
    Exited,
    Rejected(Rejection),
}

impl Investigation {
    pub fn found(&self) -> bool {
        matches!(
            self,
            Investigation::Found { .. } | Investigation::Reopened { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Incorrect { penalty: u32 },
    /// A non-final stage was answered; `next` is now open.
    StageCleared { next: usize, stages: usize },
    /// The final stage was answered and the hotspot is solved.
    Solved { reward: Option<String> },
    Rejected(Rejection),
}

impl Submission {
    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            Submission::StageCleared { .. } | Submission::Solved { .. }
        )
    }

    pub fn completed_hotspot(&self) -> bool {
        matches!(self, Submission::Solved { .. })
    }

    pub fn reward(&self) -> Option<&str> {
        match self {
            Submission::Solved { reward } => reward.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintUse {
    /// `penalty` is zero when this stage's hint was already paid for.
    Revealed { hint: String, penalty: u32 },
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Counted { remaining: u32 },
    /// Intro or sub-room transition.
    Paused,
    Expired,
    Stopped,
}

/// The answer to one intent: its typed result, the session as it now
/// stands, and whatever presentation should react to.
#[derive(Debug, Clone)]
pub struct Step<T> {
    pub result: T,
    pub snapshot: Snapshot,
    pub events: Vec<Event>,
}

impl<T> Step<T> {
    pub fn escaped(&self) -> bool {
        self.events.iter().any(|e| *e == Event::Escaped)
    }

    pub fn timed_out(&self) -> bool {
        self.events.iter().any(|e| *e == Event::TimedOut)
    }

    pub fn cleared_sub_room(&self) -> Option<usize> {
        self.events.iter().find_map(|e| match e {
            Event::SubRoomCleared { sub_room, .. } => Some(*sub_room),
            _ => None,
        })
    }
}
