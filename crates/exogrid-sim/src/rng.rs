//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Deterministic sine-hash sequence used by every synthesiser."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use exogrid_common::config::DEFAULT_SEED;

/// Reproducible pseudo-random stream.
///
/// Each draw hashes the current cursor through `sin`, keeps the fractional part of
/// the scaled result and advances the cursor by one. Two sequences constructed with
/// the same start value yield identical draws for as long as they are consumed in
/// the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSequence {
    cursor: i64,
    draws: u64,
}

impl Default for SeedSequence {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl SeedSequence {
    pub fn new(seed: i64) -> Self {
        Self {
            cursor: seed,
            draws: 0,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        let x = (self.cursor as f64).sin() * 10_000.0;
        self.cursor = self.cursor.wrapping_add(1);
        self.draws += 1;
        let frac = x - x.floor();
        // a tiny negative x can round up to exactly 1.0
        if frac >= 1.0 {
            0.0
        } else {
            frac
        }
    }

    /// Uniform real in `[min, max)`. Consumes one draw.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.draw() * (max - min)
    }

    /// Uniform integer in `[min, max]`, both ends inclusive. Consumes one draw.
    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.uniform(min as f64, (max + 1) as f64).floor() as i64
    }

    /// Value the next draw will hash.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Number of draws consumed since construction.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(value))
}

/// Round half away from zero to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stream_matches_reference_values() {
        let mut rng = SeedSequence::default();
        let expected = [
            0.900_481_873_315_584_4,
            0.856_316_577_769_575_8,
            0.443_397_292_755_435_05,
        ];
        for value in expected {
            assert!((rng.draw() - value).abs() < 1e-9);
        }
        assert_eq!(rng.cursor(), DEFAULT_SEED + 3);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn seed_zero_starts_at_zero() {
        let mut rng = SeedSequence::new(0);
        assert_eq!(rng.draw(), 0.0);
        assert!((rng.draw() - 0.709_848_078_964_569_1).abs() < 1e-9);
    }

    #[test]
    fn clones_replay_the_same_stream() {
        let mut a = SeedSequence::new(7);
        a.draw();
        let mut b = a.clone();
        for _ in 0..32 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn helpers_stay_in_range() {
        let mut rng = SeedSequence::default();
        for _ in 0..2_000 {
            let v = rng.uniform(0.5, 0.7);
            assert!((0.5..0.7).contains(&v));
            let n = rng.uniform_int(-2, 2);
            assert!((-2..=2).contains(&n));
        }
    }

    #[test]
    fn uniform_int_reaches_both_bounds() {
        let mut rng = SeedSequence::default();
        let draws: Vec<i64> = (0..500).map(|_| rng.uniform_int(0, 2)).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&2));
    }

    #[test]
    fn clamp_and_round() {
        assert_eq!(clamp(5.0, 0.9, 3.4), 3.4);
        assert_eq!(clamp(-1.0, 0.9, 3.4), 0.9);
        assert_eq!(clamp(2.0, 0.9, 3.4), 2.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(2.5), 2.5);
    }
}
