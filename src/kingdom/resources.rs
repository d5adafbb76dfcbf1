//! Resource stockpile - food, wood, stone, iron

use serde::{Deserialize, Serialize};

use crate::core::config::ResourceConfig;
use crate::core::types::ResourceKind;
use crate::kingdom::ResourceState;

/// An amount of every resource, used for gathering and consumption orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub iron: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceManager {
    food: u32,
    wood: u32,
    stone: u32,
    iron: u32,
}

impl ResourceManager {
    pub fn from_config(config: &ResourceConfig) -> Self {
        Self {
            food: config.food,
            wood: config.wood,
            stone: config.stone,
            iron: config.iron,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Iron => self.iron,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Iron => &mut self.iron,
        }
    }

    pub fn gather(&mut self, bundle: ResourceBundle) {
        self.food += bundle.food;
        self.wood += bundle.wood;
        self.stone += bundle.stone;
        self.iron += bundle.iron;
        tracing::debug!("Gathered {:?}", bundle);
    }

    pub fn has(&self, bundle: &ResourceBundle) -> bool {
        self.food >= bundle.food
            && self.wood >= bundle.wood
            && self.stone >= bundle.stone
            && self.iron >= bundle.iron
    }

    /// Consume every resource in `bundle`, or nothing if any is short
    pub fn consume(&mut self, bundle: ResourceBundle) -> bool {
        if !self.has(&bundle) {
            tracing::warn!("Insufficient resources for {:?}", bundle);
            return false;
        }
        self.food -= bundle.food;
        self.wood -= bundle.wood;
        self.stone -= bundle.stone;
        self.iron -= bundle.iron;
        true
    }

    /// Consume a single resource, or nothing if short
    pub fn consume_fixed(&mut self, kind: ResourceKind, amount: u32) -> bool {
        let slot = self.slot_mut(kind);
        if *slot < amount {
            tracing::warn!("Not enough {} available", kind.name());
            return false;
        }
        *slot -= amount;
        true
    }

    /// Remove a fraction (0.0 - 1.0) of one resource; returns the amount lost
    pub fn lose_fraction(&mut self, kind: ResourceKind, fraction: f32) -> u32 {
        let slot = self.slot_mut(kind);
        let lost = (*slot as f32 * fraction.clamp(0.0, 1.0)) as u32;
        *slot -= lost;
        lost
    }
}

impl ResourceState for ResourceManager {
    fn food(&self) -> u32 {
        self.food
    }

    fn wood(&self) -> u32 {
        self.wood
    }

    fn stone(&self) -> u32 {
        self.stone
    }

    fn iron(&self) -> u32 {
        self.iron
    }
}

impl std::fmt::Display for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "====== Resource Stock ======")?;
        write!(
            f,
            "Food: {} | Wood: {} | Stone: {} | Iron: {}",
            self.food, self.wood, self.stone, self.iron
        )
    }
}
