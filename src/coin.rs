use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the independent coin draws that decide how tall a new tower gets.
pub trait Coin {
    /// Returns `true` when the tower should grow one more level.
    fn flip(&mut self) -> bool;
}

/// A fair coin backed by a uniform variate: heads when the draw from `[0, 1)`
/// is strictly greater than one half.
pub struct FairCoin<R = StdRng> {
    rng: R,
}

impl FairCoin<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same sequence of flips.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> FairCoin<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Coin for FairCoin<R> {
    fn flip(&mut self) -> bool {
        self.rng.gen::<f64>() > 0.5
    }
}
