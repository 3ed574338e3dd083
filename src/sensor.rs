use rand::{SeedableRng, rngs::StdRng};

use crate::reading::Reading;

#[derive(Debug)]
pub struct Sensor {
    rng: StdRng,
    next_sequence: u64,
}

impl Sensor {
    pub fn new() -> Sensor {
        Sensor::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Sensor {
        Sensor::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Sensor {
        Sensor {
            rng,
            next_sequence: 1,
        }
    }

    /// Returns the reading together with its 1-based sequence number.
    pub fn measure(&mut self) -> (u64, Reading) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        (sequence, Reading::generate(&mut self.rng))
    }
}

impl Default for Sensor {
    fn default() -> Self {
        Sensor::new()
    }
}
