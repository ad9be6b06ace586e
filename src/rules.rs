//! Survival/birth predicates for B3/S23, with a pluggable birth policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the birth threshold for a given generation.
///
/// The classic rule is a constant 3. `MutatingBirth` recreates an
/// experimental perturbation from an earlier build of this program; it is
/// never installed by default because it silently alters simulation
/// correctness.
pub trait BirthPolicy: Send {
    fn birth_threshold(&mut self, generation: u64) -> u8;
}

/// B3: a dead cell is born with exactly 3 live neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicBirth;

impl BirthPolicy for ClassicBirth {
    #[inline]
    fn birth_threshold(&mut self, _generation: u64) -> u8 {
        3
    }
}

/// Every `period` generations, a 1-in-10 roll drops the birth threshold to 2
/// for that generation only.
pub struct MutatingBirth {
    period: u64,
    rng: StdRng,
}

impl MutatingBirth {
    pub fn new(period: u64, seed: u64) -> Self {
        Self {
            period: period.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BirthPolicy for MutatingBirth {
    fn birth_threshold(&mut self, generation: u64) -> u8 {
        if generation % self.period == 0 && self.rng.random_range(0..10) == 4 {
            2
        } else {
            3
        }
    }
}

/// Rule predicates applied per cell by the engine.
pub struct Rules {
    birth: Box<dyn BirthPolicy>,
}

impl Default for Rules {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rules {
    /// Standard B3/S23.
    pub fn conway() -> Self {
        Self {
            birth: Box::new(ClassicBirth),
        }
    }

    /// B3/S23 with an injected birth policy.
    pub fn with_birth_policy(policy: Box<dyn BirthPolicy>) -> Self {
        Self { birth: policy }
    }

    /// A live cell dies unless it has exactly 2 or 3 live neighbours.
    #[inline]
    pub fn survives(&self, live_neighbours: u8) -> bool {
        live_neighbours == 2 || live_neighbours == 3
    }

    /// A dead cell stays dead unless it has exactly the threshold number of
    /// live neighbours.
    #[inline]
    pub fn born(&mut self, live_neighbours: u8, generation: u64) -> bool {
        live_neighbours == self.birth.birth_threshold(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::{MutatingBirth, Rules};

    #[test]
    fn classic_predicates() {
        let mut rules = Rules::conway();
        for n in 0..=8u8 {
            assert_eq!(rules.survives(n), n == 2 || n == 3, "survive with {n}");
            assert_eq!(rules.born(n, 0), n == 3, "born with {n}");
        }
    }

    #[test]
    fn mutating_birth_only_fires_on_period() {
        let mut rules = Rules::with_birth_policy(Box::new(MutatingBirth::new(1000, 42)));
        // Off-period generations always use the classic threshold.
        for generation in 1..1000 {
            assert!(rules.born(3, generation));
            assert!(!rules.born(2, generation));
        }
    }

    #[test]
    fn mutating_birth_eventually_lowers_threshold() {
        let mut rules = Rules::with_birth_policy(Box::new(MutatingBirth::new(1, 42)));
        let fired = (0..1000u64).any(|generation| rules.born(2, generation));
        assert!(fired, "threshold never dropped to 2 in 1000 rolls");
    }
}
