//! The discovery roll: whether investigating a hotspot turns up its puzzle.
//!
//! This is the engine's only source of randomness. Sessions take any
//! [`DiscoverySource`], so tests can script both outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait DiscoverySource {
    /// One Bernoulli trial with success probability `chance`.
    fn discover(&mut self, chance: f64) -> bool;
}

/// Production source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDiscovery<R = StdRng> {
    rng: R,
}

impl RandomDiscovery<StdRng> {
    pub fn from_entropy() -> Self {
        RandomDiscovery {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomDiscovery {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomDiscovery<R> {
    pub fn new(rng: R) -> Self {
        RandomDiscovery { rng }
    }
}

impl<R: Rng> DiscoverySource for RandomDiscovery<R> {
    fn discover(&mut self, chance: f64) -> bool {
        self.rng.gen_bool(chance.clamp(0.0, 1.0))
    }
}

/// Replays fixed outcomes, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedDiscovery {
    rolls: VecDeque<bool>,
    fallback: bool,
}

impl ScriptedDiscovery {
    pub fn new(rolls: impl IntoIterator<Item = bool>) -> Self {
        ScriptedDiscovery {
            rolls: rolls.into_iter().collect(),
            fallback: true,
        }
    }

    pub fn always(found: bool) -> Self {
        ScriptedDiscovery {
            rolls: VecDeque::new(),
            fallback: found,
        }
    }

    pub fn then(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }
}

impl DiscoverySource for ScriptedDiscovery {
    fn discover(&mut self, _chance: f64) -> bool {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_rolls_replay_then_fall_back() {
        let mut source = ScriptedDiscovery::new([false, true]).then(false);
        assert!(!source.discover(0.7));
        assert!(source.discover(0.7));
        assert!(!source.discover(0.7));
        assert!(!source.discover(0.7));
    }

    #[test]
    fn certain_chances_are_certain() {
        let mut source = RandomDiscovery::seeded(7);
        assert!((0..100).all(|_| source.discover(1.0)));
        assert!((0..100).all(|_| !source.discover(0.0)));
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomDiscovery::seeded(42);
        let mut b = RandomDiscovery::seeded(42);
        let left: Vec<bool> = (0..32).map(|_| a.discover(0.7)).collect();
        let right: Vec<bool> = (0..32).map(|_| b.discover(0.7)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn hit_rate_tracks_chance() {
        let mut source = RandomDiscovery::seeded(2024);
        let hits = (0..10_000).filter(|_| source.discover(0.7)).count();
        assert!((6_500..7_500).contains(&hits), "hits = {hits}");
    }
}
