use leaderboard_core::Group;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

/// A single points award for one house.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRecord {
    pub id: u64,
    pub group: Group,
    pub points: u64,
    pub at: Instant,
}

/// Produces synthetic point awards with a seeded PRNG so runs can be replayed.
pub struct RecordGenerator {
    rng: StdRng,
    max_points: u64,
    next_id: u64,
}

impl RecordGenerator {
    pub fn new(seed: Option<u64>, max_points: u64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_points: max_points.max(1),
            next_id: 1,
        }
    }

    pub fn next_record(&mut self, at: Instant) -> PointRecord {
        let group = Group::ALL[self.rng.gen_range(0..Group::ALL.len())];
        let points = self.rng.gen_range(1..=self.max_points);
        let id = self.next_id;
        self.next_id += 1;
        PointRecord {
            id,
            group,
            points,
            at,
        }
    }
}
