//! RNG trait abstraction for World simulation
//!
//! Every random decision in the engine goes through this trait so a world can
//! run on a seeded generator (reproducible tests) or a scripted stub.

/// Random number generator trait for World simulation
pub trait WorldRng {
    /// Uniform integer in `[min, max]`, both ends inclusive
    fn random_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform index into a non-empty list of `len` entries
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on an empty list");
        self.random_int(0, len as i32 - 1) as usize
    }

    /// Percent roll: draws from `[0, 100]` and succeeds below `chance`
    fn roll_percent(&mut self, chance: i32) -> bool {
        self.random_int(0, 100) < chance
    }

    /// Per-mille roll: draws from `[0, 1000]` and succeeds below `chance`
    fn roll_permille(&mut self, chance: i32) -> bool {
        self.random_int(0, 1000) < chance
    }
}

// Blanket implementation for any type implementing rand::Rng
// (Xoshiro256StarStar for seeded worlds, ThreadRng, StdRng, ...)
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::Rng::gen_range(self, min..=max)
    }
}
