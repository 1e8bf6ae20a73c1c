//! Quest template catalog and template sampling.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::types::QuestTemplate;

/// Number of daily quests handed out per generation cycle.
pub const DAILY_QUEST_COUNT: usize = 3;

/// Picks distinct template indices for a generation cycle.
pub trait QuestSampler {
    /// Choose `count` distinct indices from `0..pool_size`.
    ///
    /// Returns fewer than `count` indices only when the pool is smaller.
    fn pick(&self, pool_size: usize, count: usize) -> Vec<usize>;
}

/// Uniform sampling without replacement.
pub struct RandomSampler {
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// Sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sampler for reproducible selections.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl QuestSampler for RandomSampler {
    fn pick(&self, pool_size: usize, count: usize) -> Vec<usize> {
        let amount = count.min(pool_size);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rand::seq::index::sample(&mut *rng, pool_size, amount).into_vec()
    }
}

/// Read-only table of quest templates.
#[derive(Debug, Clone)]
pub struct QuestCatalog {
    templates: Vec<QuestTemplate>,
}

impl QuestCatalog {
    /// Build a catalog from an explicit template list.
    pub fn new(templates: Vec<QuestTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[QuestTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Select `count` distinct templates through `sampler`.
    ///
    /// Out-of-range or repeated indices from the sampler are ignored.
    pub fn select(&self, sampler: &dyn QuestSampler, count: usize) -> Vec<&QuestTemplate> {
        let mut seen = Vec::with_capacity(count);
        for index in sampler.pick(self.templates.len(), count) {
            if seen.len() == count {
                break;
            }
            if index < self.templates.len() && !seen.contains(&index) {
                seen.push(index);
            }
        }
        seen.into_iter().map(|i| &self.templates[i]).collect()
    }
}

impl Default for QuestCatalog {
    fn default() -> Self {
        Self::new(vec![
            QuestTemplate::new(
                "Push Your Limits",
                "Complete 20 push-ups to build your strength",
                "push_ups",
                20,
                50,
                25,
            ),
            QuestTemplate::new(
                "Hydration Hunter",
                "Drink 8 glasses of water to maintain your vitality",
                "water_intake",
                8,
                30,
                15,
            ),
            QuestTemplate::new(
                "Speed Demon",
                "Run 2 miles to increase your agility",
                "running",
                2,
                75,
                40,
            ),
            QuestTemplate::new(
                "Core Crusher",
                "Do 30 sit-ups to strengthen your core",
                "sit_ups",
                30,
                45,
                20,
            ),
            QuestTemplate::new(
                "Iron Will",
                "Complete a 30-minute workout session",
                "gym_session",
                30,
                100,
                50,
            ),
        ])
    }
}
