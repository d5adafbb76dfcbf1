//! Stronghold - Turn-Based Kingdom Management Simulation

pub mod ai;
pub mod core;
pub mod game;
pub mod history;
pub mod kingdom;
pub mod save;
pub mod score_log;
