use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<K> {
    id: TimerId,
    due: Duration,
    kind: K,
}

/// Delayed work owned by one session. Time only moves through `advance`,
/// and nothing scheduled here outlives `cancel_all` or the owner.
#[derive(Debug, Clone)]
pub struct Timers<K> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Timers {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<K> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, kind: K, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            kind,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index).kind)
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Moves time forward and hands back everything that came due, earliest
    /// first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<K> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.kind).collect()
    }
}
