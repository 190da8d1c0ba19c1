//! Interaction status strategies
//!
//! Records carry nothing a real status could be derived from yet, so the
//! default strategy is a labelled placeholder that picks one at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roast_domain::{InteractionStatus, StatusStrategy};
use std::sync::{Mutex, PoisonError};

/// Placeholder: a uniformly random status, ignoring the rules
#[derive(Debug)]
pub struct RandomStatus {
    rng: Mutex<StdRng>,
}

impl RandomStatus {
    /// Seed from system entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusStrategy for RandomStatus {
    fn assign(&self, _interaction_name: &str, _rule_status: &str) -> InteractionStatus {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        InteractionStatus::ALL[rng.gen_range(0..InteractionStatus::ALL.len())]
    }
}

/// The same status for every interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStatus(pub InteractionStatus);

impl StatusStrategy for FixedStatus {
    fn assign(&self, _interaction_name: &str, _rule_status: &str) -> InteractionStatus {
        self.0
    }
}
