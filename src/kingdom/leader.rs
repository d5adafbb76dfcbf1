//! Leadership - the ruler and the policy style they impose each turn

use serde::{Deserialize, Serialize};

use crate::kingdom::{Army, ArmyState, Economy};

const MONARCHY_TAX_RELIEF: f32 = 0.01;
const MONARCHY_MIN_TAX: f32 = 0.05;
const MONARCHY_MORALE_GAIN: u32 = 5;

const TYRANNY_TAX_HIKE: f32 = 0.05;
const TYRANNY_MAX_TAX: f32 = 0.5;
const TYRANNY_MORALE_LOSS: u32 = 5;
const TYRANNY_SEIZURE: u32 = 100;

/// Policy style - enum variants for static dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadershipPolicy {
    /// Light taxes, loyal troops
    #[default]
    Monarchy,
    /// Heavy taxes, seizures, resentful troops
    Tyranny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub policy: LeadershipPolicy,
}

impl Leader {
    pub fn new(name: impl Into<String>, policy: LeadershipPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }

    /// Apply this leader's policy to the kingdom; returns a one-line summary
    pub fn apply_policy(&self, economy: &mut Economy, army: &mut Army) -> String {
        let summary = match self.policy {
            LeadershipPolicy::Monarchy => {
                economy.tax_rate = (economy.tax_rate - MONARCHY_TAX_RELIEF).max(MONARCHY_MIN_TAX);
                army.raise_morale(MONARCHY_MORALE_GAIN);
                format!(
                    "{} eases taxes to {:.0}% and rallies the troops (morale {}%)",
                    self.name,
                    economy.tax_rate * 100.0,
                    army.morale()
                )
            }
            LeadershipPolicy::Tyranny => {
                economy.tax_rate = (economy.tax_rate + TYRANNY_TAX_HIKE).min(TYRANNY_MAX_TAX);
                economy.treasury += TYRANNY_SEIZURE;
                army.lower_morale(TYRANNY_MORALE_LOSS);
                format!(
                    "{} raises taxes to {:.0}% and seizes {} gold (morale {}%)",
                    self.name,
                    economy.tax_rate * 100.0,
                    TYRANNY_SEIZURE,
                    army.morale()
                )
            }
        };

        tracing::info!("{}", summary);
        summary
    }
}

impl std::fmt::Display for Leader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ruler: {} ({:?})", self.name, self.policy)
    }
}
