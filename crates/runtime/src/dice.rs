//! Dice rolling.
//!
//! The flow only decides *what* to roll; a [`DiceRoller`] decides the faces.
//! [`SeededDice`] is deterministic for a given seed, which makes whole runs
//! reproducible.
use async_trait::async_trait;
use game_core::{RollFormula, RollOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tokio::sync::Mutex;

/// Upper bound on accuracy/difficulty dice for a single roll.
pub const MAX_ACCURACY_DICE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("formula {formula} rolls {count} accuracy dice (max {max})", max = MAX_ACCURACY_DICE)]
    TooManyDice { formula: String, count: usize },
}

#[async_trait]
pub trait DiceRoller: Send + Sync {
    async fn roll(&self, formula: RollFormula) -> Result<RollOutcome, DiceError>;
}

/// ChaCha-backed dice shared between concurrent flows.
pub struct SeededDice {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

#[async_trait]
impl DiceRoller for SeededDice {
    async fn roll(&self, formula: RollFormula) -> Result<RollOutcome, DiceError> {
        let count = formula.accuracy_dice();
        if count > MAX_ACCURACY_DICE {
            return Err(DiceError::TooManyDice {
                formula: formula.to_string(),
                count,
            });
        }

        let mut rng = self.rng.lock().await;
        let d20 = rng.gen_range(1..=20);
        let dice = (0..count).map(|_| rng.gen_range(1..=6)).collect();
        Ok(RollOutcome::resolve(formula, d20, dice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_same_rolls() {
        let a = SeededDice::from_seed(7);
        let b = SeededDice::from_seed(7);
        let formula = RollFormula::new(2, 3);
        for _ in 0..5 {
            assert_eq!(a.roll(formula).await, b.roll(formula).await);
        }
    }

    #[tokio::test]
    async fn faces_stay_in_range() {
        let dice = SeededDice::from_seed(1);
        for _ in 0..50 {
            let outcome = dice.roll(RollFormula::new(0, -2)).await.expect("roll");
            assert!((1..=20).contains(&outcome.d20));
            assert_eq!(outcome.accuracy_dice.len(), 2);
            assert!(outcome.accuracy_dice.iter().all(|d| (1..=6).contains(d)));
        }
    }

    #[tokio::test]
    async fn absurd_accuracy_is_rejected() {
        let dice = SeededDice::from_seed(1);
        let err = dice.roll(RollFormula::new(0, 40)).await.expect_err("too many dice");
        assert!(matches!(err, DiceError::TooManyDice { count: 40, .. }));
    }
}
