//! RNG module - injectable gem randomness
//!
//! Every random draw the engine makes goes through [`GemSource`], so tests can
//! script exact boards and cascades while the game uses a seeded LCG.

use std::collections::VecDeque;

use crate::types::Gem;

/// Source of fresh gems for the initial fill and cascade refills
pub trait GemSource {
    /// Draw a gem uniformly from `0..kinds`
    fn next_gem(&mut self, kinds: u8) -> Gem;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (a seed that reproduces the remaining sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GemSource for SimpleRng {
    fn next_gem(&mut self, kinds: u8) -> Gem {
        Gem(self.next_range(kinds as u32) as u8)
    }
}

/// Plays back a fixed list of gems, then continues with a seeded [`SimpleRng`].
///
/// Scripted values are taken modulo `kinds` so a script never produces a
/// symbol outside the alphabet.
#[derive(Debug, Clone)]
pub struct ScriptedGems {
    script: VecDeque<u8>,
    fallback: SimpleRng,
}

impl ScriptedGems {
    pub fn new(script: impl IntoIterator<Item = u8>) -> Self {
        Self::with_fallback(script, SimpleRng::default())
    }

    pub fn with_fallback(script: impl IntoIterator<Item = u8>, fallback: SimpleRng) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }

    /// Scripted gems not yet drawn
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl GemSource for ScriptedGems {
    fn next_gem(&mut self, kinds: u8) -> Gem {
        match self.script.pop_front() {
            Some(v) => Gem(v % kinds.max(1)),
            None => self.fallback.next_gem(kinds),
        }
    }
}

impl<S: GemSource + ?Sized> GemSource for &mut S {
    fn next_gem(&mut self, kinds: u8) -> Gem {
        (**self).next_gem(kinds)
    }
}
