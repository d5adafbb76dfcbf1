//! Economy - treasury, taxation, and spending

use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::kingdom::{EconomyState, PopulationState};

/// Gold a citizen earns per season before tax
pub const INCOME_PER_CAPITA: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub treasury: u32,
    pub tax_rate: f32,
    pub inflation: f32,
}

impl Economy {
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self {
            treasury: config.treasury,
            tax_rate: config.tax_rate,
            inflation: config.inflation,
        }
    }

    /// Revenue a tax collection on `population` would yield right now
    pub fn expected_revenue(&self, population: u32) -> u32 {
        let gross = population as f32 * self.tax_rate * INCOME_PER_CAPITA;
        (gross * (1.0 - self.inflation)).max(0.0) as u32
    }

    pub fn receive_loan(&mut self, amount: u32) {
        self.treasury += amount;
        tracing::info!("Loan of {} gold received", amount);
    }

    /// Take up to `amount` gold; returns what was actually taken
    pub fn seize(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.treasury);
        self.treasury -= taken;
        taken
    }
}

impl EconomyState for Economy {
    fn treasury(&self) -> u32 {
        self.treasury
    }

    fn tax_population<P: PopulationState + ?Sized>(&mut self, population: &P) {
        let revenue = self.expected_revenue(population.total());
        self.treasury += revenue;
        tracing::debug!("Collected {} gold in taxes", revenue);
    }

    fn spend(&mut self, amount: u32) -> bool {
        if self.treasury < amount {
            tracing::warn!(
                "Treasury cannot cover {} gold (holding {})",
                amount,
                self.treasury
            );
            return false;
        }
        self.treasury -= amount;
        true
    }
}

impl std::fmt::Display for Economy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====== Economy ======")?;
        writeln!(f, "Treasury: {} gold", self.treasury)?;
        write!(
            f,
            "Tax rate: {:.0}% | Inflation: {:.0}%",
            self.tax_rate * 100.0,
            self.inflation * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PopulationConfig;
    use crate::kingdom::Population;

    #[test]
    fn test_tax_collection_adds_revenue() {
        let mut economy = Economy::from_config(&EconomyConfig::default());
        let pop = Population::from_config(&PopulationConfig::default());

        // 1000 * 0.15 * 4 * 0.98
        assert_eq!(economy.expected_revenue(pop.total()), 588);
        economy.tax_population(&pop);
        assert_eq!(economy.treasury, 1588);
    }

    #[test]
    fn test_spend_refuses_when_short() {
        let mut economy = Economy::from_config(&EconomyConfig::default());
        assert!(!economy.spend(1001));
        assert_eq!(economy.treasury, 1000);
        assert!(economy.spend(400));
        assert_eq!(economy.treasury, 600);
    }

    #[test]
    fn test_seize_caps_at_treasury() {
        let mut economy = Economy::from_config(&EconomyConfig::default());
        assert_eq!(economy.seize(1500), 1000);
        assert_eq!(economy.treasury, 0);
    }
}
