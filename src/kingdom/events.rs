//! Random kingdom events
//!
//! Events are drawn from a seeded ChaCha8 stream so a run with the same seed
//! plays out the same way.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;
use crate::kingdom::{ArmyState, Kingdom, PopulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Famine,
    Disease,
    War,
    Betrayal,
    Earthquake,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Famine,
        EventKind::Disease,
        EventKind::War,
        EventKind::Betrayal,
        EventKind::Earthquake,
    ];

    /// How much the event stirs up internal conflict
    pub fn unrest(self) -> u32 {
        match self {
            EventKind::Famine => 2,
            EventKind::Disease => 1,
            EventKind::War => 3,
            EventKind::Betrayal => 2,
            EventKind::Earthquake => 1,
        }
    }
}

/// Draws and applies random events
#[derive(Debug, Clone)]
pub struct EventManager {
    rng: ChaCha8Rng,
}

impl EventManager {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shared access to the event stream, for other seeded systems
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Pick an event at random and apply it; returns the event and its label
    pub fn trigger(&mut self, kingdom: &mut Kingdom) -> (EventKind, String) {
        let kind = EventKind::ALL[self.rng.gen_range(0..EventKind::ALL.len())];
        let label = apply(kind, kingdom);
        (kind, label)
    }
}

/// Apply one event's effects to the kingdom; returns a short label
pub fn apply(kind: EventKind, kingdom: &mut Kingdom) -> String {
    let label = match kind {
        EventKind::Famine => {
            let food_lost = kingdom.resources.lose_fraction(ResourceKind::Food, 0.3);
            let deaths = kingdom.population.total() / 20;
            kingdom.population.decrease(deaths);
            format!("Famine: {} food spoiled, {} starved", food_lost, deaths)
        }
        EventKind::Disease => {
            let deaths = kingdom.population.total() / 10;
            kingdom.population.decrease(deaths);
            format!("Disease: {} died", deaths)
        }
        EventKind::War => {
            kingdom.army.lower_morale(15);
            let cost = kingdom.economy.seize(200);
            format!("War: morale -15, {} gold spent", cost)
        }
        EventKind::Betrayal => {
            let stolen = kingdom.economy.seize(kingdom.economy.treasury * 15 / 100);
            format!("Betrayal: {} gold embezzled", stolen)
        }
        EventKind::Earthquake => {
            let wood = kingdom.resources.lose_fraction(ResourceKind::Wood, 0.2);
            let stone = kingdom.resources.lose_fraction(ResourceKind::Stone, 0.2);
            format!("Earthquake: {} wood and {} stone lost", wood, stone)
        }
    };

    tracing::info!("Event triggered: {}", label);
    label
}
