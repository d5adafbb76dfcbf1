//! Royal bank - crown loans and treasury audits

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::kingdom::{Economy, EconomyState};

/// Most gold the crown may owe the bank at once
pub const CREDIT_LIMIT: u32 = 2000;
/// Chance that an audit uncovers skimming
const FRAUD_CHANCE: f64 = 0.1;
/// Share of the treasury found missing when fraud is uncovered
const FRAUD_SHARE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Clean,
    Fraud { lost: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub loans_issued: u32,
    pub fraud_detected: u32,
    /// Gold the crown still owes
    pub outstanding: u32,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the books after a collection; skimmed gold is written off
    pub fn audit_treasury<R: Rng>(&mut self, economy: &mut Economy, rng: &mut R) -> AuditOutcome {
        if !rng.gen_bool(FRAUD_CHANCE) {
            tracing::debug!("Treasury audit clean ({} gold)", economy.treasury());
            return AuditOutcome::Clean;
        }

        let missing = (economy.treasury() as f32 * FRAUD_SHARE) as u32;
        let lost = economy.seize(missing);
        self.fraud_detected += 1;
        tracing::warn!("Audit uncovered fraud: {} gold missing", lost);
        AuditOutcome::Fraud { lost }
    }

    /// Lend `amount` to the crown; refused past the credit limit
    pub fn issue_loan(&mut self, economy: &mut Economy, amount: u32) -> bool {
        if amount == 0 || self.outstanding + amount > CREDIT_LIMIT {
            tracing::warn!(
                "Loan of {} refused (owing {}, limit {})",
                amount,
                self.outstanding,
                CREDIT_LIMIT
            );
            return false;
        }

        economy.receive_loan(amount);
        self.outstanding += amount;
        self.loans_issued += 1;
        true
    }

    /// Pay back up to `amount` of the debt; returns what was repaid
    pub fn repay_loan(&mut self, economy: &mut Economy, amount: u32) -> u32 {
        let payment = amount.min(self.outstanding);
        if payment == 0 || !economy.spend(payment) {
            return 0;
        }

        self.outstanding -= payment;
        tracing::info!("Repaid {} gold, {} still owed", payment, self.outstanding);
        payment
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====== Bank ======")?;
        writeln!(
            f,
            "Loans issued: {} | Outstanding debt: {} gold",
            self.loans_issued, self.outstanding
        )?;
        write!(f, "Fraud cases detected: {}", self.fraud_detected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EconomyConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn economy() -> Economy {
        Economy::from_config(&EconomyConfig::default())
    }

    #[test]
    fn test_loan_credits_treasury() {
        let mut bank = Bank::new();
        let mut economy = economy();

        assert!(bank.issue_loan(&mut economy, 500));
        assert_eq!(economy.treasury, 1500);
        assert_eq!(bank.outstanding, 500);
        assert_eq!(bank.loans_issued, 1);
    }

    #[test]
    fn test_loan_refused_past_credit_limit() {
        let mut bank = Bank::new();
        let mut economy = economy();

        assert!(bank.issue_loan(&mut economy, 1500));
        assert!(!bank.issue_loan(&mut economy, 501));
        assert!(!bank.issue_loan(&mut economy, 0));
        assert_eq!(bank.loans_issued, 1);
        assert_eq!(economy.treasury, 2500);
    }

    #[test]
    fn test_repay_caps_at_debt() {
        let mut bank = Bank::new();
        let mut economy = economy();
        bank.issue_loan(&mut economy, 300);

        assert_eq!(bank.repay_loan(&mut economy, 1000), 300);
        assert_eq!(bank.outstanding, 0);
        assert_eq!(economy.treasury, 1000);
        assert_eq!(bank.repay_loan(&mut economy, 10), 0);
    }

    #[test]
    fn test_repay_needs_gold() {
        let mut bank = Bank::new();
        let mut economy = economy();
        bank.issue_loan(&mut economy, 400);
        economy.treasury = 100;

        assert_eq!(bank.repay_loan(&mut economy, 400), 0);
        assert_eq!(bank.outstanding, 400);
        assert_eq!(economy.treasury, 100);
    }

    #[test]
    fn test_audits_find_fraud_sometimes() {
        let mut bank = Bank::new();
        let mut economy = economy();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut frauds = 0;
        for _ in 0..200 {
            economy.treasury = 1000;
            match bank.audit_treasury(&mut economy, &mut rng) {
                AuditOutcome::Fraud { lost } => {
                    assert_eq!(lost, 50);
                    assert_eq!(economy.treasury, 950);
                    frauds += 1;
                }
                AuditOutcome::Clean => assert_eq!(economy.treasury, 1000),
            }
        }

        assert_eq!(bank.fraud_detected, frauds);
        assert!(frauds > 0 && frauds < 200);
    }
}
