//! Population - the kingdom's people, split by social class

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::PopulationConfig;
use crate::kingdom::PopulationState;

/// People eat 1 food per this many heads each season
const HEADS_PER_FOOD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub peasants: u32,
    pub merchants: u32,
    pub nobles: u32,
    pub food_stock: u32,
    /// 0.0 - 1.0
    pub happiness: f32,
}

impl Population {
    pub fn from_config(config: &PopulationConfig) -> Self {
        Self {
            peasants: config.peasants,
            merchants: config.merchants,
            nobles: config.nobles,
            food_stock: config.food_stock,
            happiness: config.happiness,
        }
    }

    /// Advance the populace one season: eat, then grow or shrink.
    ///
    /// Returns the signed change in total population.
    pub fn simulate<R: Rng>(&mut self, rng: &mut R) -> i64 {
        let before = self.total() as i64;
        let needed = self.total() / HEADS_PER_FOOD;

        if self.food_stock >= needed {
            self.food_stock -= needed;
            // Fed people grow by up to 3%, scaled by how content they are
            let rate = rng.gen_range(0.0f32..0.03) * self.happiness;
            self.grow(rate);
            self.happiness = (self.happiness + 0.02).min(1.0);
        } else {
            self.food_stock = 0;
            let lost = self.total() / 20;
            self.decrease(lost);
            self.happiness = (self.happiness - 0.1).max(0.0);
            tracing::warn!("Food shortage: {} people lost", lost);
        }

        let delta = self.total() as i64 - before;
        tracing::debug!("Population simulated: {} -> {}", before, self.total());
        delta
    }

    fn grow(&mut self, rate: f32) {
        self.peasants += (self.peasants as f32 * rate) as u32;
        self.merchants += (self.merchants as f32 * rate) as u32;
        self.nobles += (self.nobles as f32 * rate) as u32;
    }
}

impl PopulationState for Population {
    fn total(&self) -> u32 {
        self.peasants + self.merchants + self.nobles
    }

    /// Peasants are drawn first, then merchants, then nobles
    fn decrease(&mut self, amount: u32) {
        let mut remaining = amount;
        for class in [&mut self.peasants, &mut self.merchants, &mut self.nobles] {
            let taken = remaining.min(*class);
            *class -= taken;
            remaining -= taken;
        }
    }
}

impl std::fmt::Display for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====== Population ======")?;
        writeln!(f, "Total: {}", self.total())?;
        writeln!(
            f,
            "Peasants: {} | Merchants: {} | Nobles: {}",
            self.peasants, self.merchants, self.nobles
        )?;
        write!(
            f,
            "Food stock: {} | Happiness: {:.0}%",
            self.food_stock,
            self.happiness * 100.0
        )
    }
}
