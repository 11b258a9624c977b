/// Random sources for draws.
/// Note: the engine only ever asks for a uniform unit value, so tests can
/// script exact rolls while real sessions wrap any `rand_core::RngCore`.
use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

/// Abstract source of uniform rolls in `[0, 1)`.
pub trait RollSource {
    fn next_unit(&mut self) -> f64;
}

impl<S: RollSource + ?Sized> RollSource for &mut S {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// 53-bit mantissa conversion of a raw `u64` to `[0, 1)`.
#[inline]
pub fn unit_from_u64(raw: u64) -> f64 {
    ((raw >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Adapter over any `RngCore`, counting how many rolls were taken.
#[derive(Clone, Debug)]
pub struct CountingSource<R> {
    rng: R,
    draws: u64,
}

impl<R: RngCore> CountingSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of rolls taken from this source.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RollSource for CountingSource<R> {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        unit_from_u64(self.rng.next_u64())
    }
}

/// Default seeded source used by sessions.
pub fn seeded(seed: u64) -> CountingSource<WyRand> {
    CountingSource::new(WyRand::from_seed(seed.to_le_bytes()))
}

/// Replays a fixed list of unit values, cycling when exhausted.
/// Values are returned verbatim, so out-of-range rolls can be injected.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    script: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(script: impl Into<Vec<f64>>) -> Self {
        Self { script: script.into(), cursor: 0 }
    }

    /// Rolls handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RollSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        if self.script.is_empty() {
            return 0.0;
        }
        let v = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_stays_below_one() {
        assert_eq!(unit_from_u64(0), 0.0);
        assert!(unit_from_u64(u64::MAX) < 1.0);
    }

    #[test]
    fn scripted_rolls_cycle() {
        let mut s = ScriptedRolls::new(vec![0.1, 0.9]);
        let got: Vec<f64> = (0..5).map(|_| s.next_unit()).collect();
        assert_eq!(got, vec![0.1, 0.9, 0.1, 0.9, 0.1]);
        assert_eq!(s.consumed(), 5);
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..16 {
            let (x, y) = (a.next_unit(), b.next_unit());
            assert_eq!(x, y);
            assert!((0.0..1.0).contains(&x));
        }
        assert_eq!(a.draws(), 16);
    }
}
