//! Army - soldiers, morale, and rations

use serde::{Deserialize, Serialize};

use crate::core::config::ArmyConfig;
use crate::kingdom::{ArmyState, PopulationState};

/// Rations spent training one recruit
pub const FOOD_PER_RECRUIT: u32 = 2;
/// Morale lost when recruits cannot be fed
pub const RATION_SHORTFALL_MORALE_PENALTY: u32 = 10;
/// Morale gained from a successful recruitment drive
pub const RECRUITMENT_MORALE_BOOST: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Army {
    pub soldiers: u32,
    pub morale: u32,
    pub food_supply: u32,
}

/// What happened when recruitment was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitOutcome {
    Recruited { count: u32, food_used: u32 },
    /// Zero requested, or more than the whole population
    InvalidRequest,
    /// Not enough rations to train everyone requested
    InsufficientFood { required: u32, available: u32 },
}

impl Army {
    pub fn from_config(config: &ArmyConfig) -> Self {
        Self {
            soldiers: config.soldiers,
            morale: config.morale.min(100),
            food_supply: config.food_supply,
        }
    }

    pub fn resupply(&mut self, food: u32) {
        self.food_supply += food;
    }

    pub fn raise_morale(&mut self, amount: u32) {
        self.morale = (self.morale + amount).min(100);
    }
}

impl ArmyState for Army {
    fn soldiers(&self) -> u32 {
        self.soldiers
    }

    fn morale(&self) -> u32 {
        self.morale
    }

    fn recruit_and_train<P: PopulationState + ?Sized>(
        &mut self,
        population: &mut P,
        requested: u32,
    ) -> RecruitOutcome {
        if requested == 0 || requested > population.total() {
            return RecruitOutcome::InvalidRequest;
        }

        let required = requested * FOOD_PER_RECRUIT;
        if self.food_supply < required {
            self.morale = self.morale.saturating_sub(RATION_SHORTFALL_MORALE_PENALTY);
            tracing::warn!(
                "Not enough rations to train {} soldiers ({} needed, {} held)",
                requested,
                required,
                self.food_supply
            );
            return RecruitOutcome::InsufficientFood {
                required,
                available: self.food_supply,
            };
        }

        population.decrease(requested);
        self.soldiers += requested;
        self.food_supply -= required;
        self.raise_morale(RECRUITMENT_MORALE_BOOST);
        tracing::info!("{} soldiers recruited and trained", requested);

        RecruitOutcome::Recruited {
            count: requested,
            food_used: required,
        }
    }

    fn lower_morale(&mut self, amount: u32) {
        self.morale = self.morale.saturating_sub(amount);
    }
}

impl std::fmt::Display for Army {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====== Army ======")?;
        writeln!(f, "Soldiers: {}", self.soldiers)?;
        writeln!(f, "Morale: {}%", self.morale)?;
        write!(f, "Food supply: {} units", self.food_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PopulationConfig;
    use crate::kingdom::Population;

    fn setup() -> (Army, Population) {
        (
            Army::from_config(&ArmyConfig::default()),
            Population::from_config(&PopulationConfig::default()),
        )
    }

    #[test]
    fn test_recruit_moves_people_into_army() {
        let (mut army, mut pop) = setup();
        let outcome = army.recruit_and_train(&mut pop, 30);

        assert_eq!(outcome, RecruitOutcome::Recruited { count: 30, food_used: 60 });
        assert_eq!(army.soldiers, 50);
        assert_eq!(army.food_supply, 40);
        assert_eq!(army.morale, 75);
        assert_eq!(pop.total(), 970);
    }

    #[test]
    fn test_recruit_without_rations_hurts_morale() {
        let (mut army, mut pop) = setup();
        let outcome = army.recruit_and_train(&mut pop, 80);

        assert_eq!(
            outcome,
            RecruitOutcome::InsufficientFood { required: 160, available: 100 }
        );
        assert_eq!(army.soldiers, 20);
        assert_eq!(army.morale, 60);
        assert_eq!(pop.total(), 1000);
    }

    #[test]
    fn test_invalid_requests_change_nothing() {
        let (mut army, mut pop) = setup();
        assert_eq!(army.recruit_and_train(&mut pop, 0), RecruitOutcome::InvalidRequest);
        assert_eq!(army.recruit_and_train(&mut pop, 1001), RecruitOutcome::InvalidRequest);
        assert_eq!(army.soldiers, 20);
        assert_eq!(army.morale, 70);
    }

    #[test]
    fn test_morale_clamps() {
        let (mut army, _) = setup();
        army.lower_morale(500);
        assert_eq!(army.morale, 0);
        army.raise_morale(500);
        assert_eq!(army.morale, 100);
    }
}
