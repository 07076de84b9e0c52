/// Where the countdown is in its lifecycle. Only `Running` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Before the player leaves the room introduction.
    Intro,
    Running,
    /// Held while the next sub-room is being brought in.
    Suspended,
    /// Terminal. Never resumes.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    remaining: u32,
    state: ClockState,
}

impl SessionClock {
    pub fn new(time_limit_seconds: u32) -> Self {
        SessionClock {
            remaining: time_limit_seconds,
            state: ClockState::Intro,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn start(&mut self) -> bool {
        if self.state == ClockState::Intro {
            self.state = ClockState::Running;
            true
        } else {
            false
        }
    }

    pub fn suspend(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Suspended;
        }
    }

    pub fn resume(&mut self) {
        if self.state == ClockState::Suspended {
            self.state = ClockState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// One second of play. Returns whether the countdown moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Applies a penalty immediately, floored at zero. Returns the seconds
    /// actually taken.
    pub fn penalize(&mut self, seconds: u32) -> u32 {
        if self.state == ClockState::Stopped {
            return 0;
        }
        let taken = seconds.min(self.remaining);
        self.remaining -= taken;
        taken
    }
}
