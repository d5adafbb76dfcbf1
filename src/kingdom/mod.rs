//! Kingdom world state
//!
//! The decision engine and history store only see the kingdom through the
//! traits below. The concrete entities are plain counters with a little
//! arithmetic; anything that implements the traits can stand in for them.

pub mod army;
pub mod bank;
pub mod economy;
pub mod events;
pub mod leader;
pub mod population;
pub mod resources;

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;

pub use army::{Army, RecruitOutcome};
pub use bank::{AuditOutcome, Bank};
pub use economy::Economy;
pub use events::{EventKind, EventManager};
pub use leader::{Leader, LeadershipPolicy};
pub use population::Population;
pub use resources::{ResourceBundle, ResourceManager};

/// Read access to the populace, plus the one mutation recruitment needs
pub trait PopulationState {
    fn total(&self) -> u32;

    /// Remove `amount` people (saturating at zero)
    fn decrease(&mut self, amount: u32);
}

pub trait EconomyState {
    fn treasury(&self) -> u32;

    /// Collect taxes from `population` at the economy's own rate
    fn tax_population<P: PopulationState + ?Sized>(&mut self, population: &P);

    /// Pay `amount` from the treasury; returns false (and pays nothing) if short
    fn spend(&mut self, amount: u32) -> bool;
}

pub trait ArmyState {
    fn soldiers(&self) -> u32;

    /// 0 - 100
    fn morale(&self) -> u32;

    /// Draft `requested` recruits out of `population`
    fn recruit_and_train<P: PopulationState + ?Sized>(
        &mut self,
        population: &mut P,
        requested: u32,
    ) -> RecruitOutcome;

    fn lower_morale(&mut self, amount: u32);
}

/// Read-only stockpile access, used for snapshots
pub trait ResourceState {
    fn food(&self) -> u32;
    fn wood(&self) -> u32;
    fn stone(&self) -> u32;
    fn iron(&self) -> u32;
}

/// All world-state entities of one kingdom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kingdom {
    pub population: Population,
    pub army: Army,
    pub economy: Economy,
    pub resources: ResourceManager,
    pub leader: Leader,
    #[serde(default)]
    pub bank: Bank,
}

impl Kingdom {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            population: Population::from_config(&config.population),
            army: Army::from_config(&config.army),
            economy: Economy::from_config(&config.economy),
            resources: ResourceManager::from_config(&config.resources),
            leader: Leader::new(config.leader.name.clone(), config.leader.policy),
            bank: Bank::new(),
        }
    }

    /// Check ranges that arithmetic keeps but a hand-edited save may not
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.army.morale > 100 {
            return Err(format!("army.morale ({}) must be within 0-100", self.army.morale));
        }

        for (name, value) in [
            ("economy.tax_rate", self.economy.tax_rate),
            ("economy.inflation", self.economy.inflation),
            ("population.happiness", self.population.happiness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within 0.0-1.0", name, value));
            }
        }

        Ok(())
    }

    /// Multi-line overview of every entity
    pub fn overview(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.leader, self.population, self.army, self.economy, self.bank, self.resources
        )
    }
}

impl Default for Kingdom {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kingdom_from_default_config() {
        let kingdom = Kingdom::default();
        assert_eq!(kingdom.population.total(), 1000);
        assert_eq!(kingdom.army.soldiers(), 20);
        assert_eq!(kingdom.army.morale(), 70);
        assert_eq!(kingdom.economy.treasury(), 1000);
        assert_eq!(kingdom.resources.food(), 500);
        assert_eq!(kingdom.resources.iron(), 100);
    }

    #[test]
    fn test_overview_mentions_every_entity() {
        let overview = Kingdom::default().overview();
        assert!(overview.contains("Population"));
        assert!(overview.contains("Army"));
        assert!(overview.contains("Treasury"));
        assert!(overview.contains("Stone"));
        assert!(overview.contains("Loans issued: 0"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_state() {
        assert!(Kingdom::default().validate().is_ok());

        let mut kingdom = Kingdom::default();
        kingdom.army.morale = 250;
        assert!(kingdom.validate().unwrap_err().contains("army.morale"));

        let mut kingdom = Kingdom::default();
        kingdom.economy.tax_rate = 3.0;
        assert!(kingdom.validate().unwrap_err().contains("tax_rate"));
    }
}
