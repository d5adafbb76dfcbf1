//! Autonomous kingdom controller
//!
//! The decision engine makes taxation, recruitment, and conflict policy from
//! live kingdom state and keeps an audit trail of decision codes.

pub mod engine;
pub mod report;

pub use engine::{
    DecisionEngine, DecisionLog, PRIORITY_LABELS, RESOURCE_TYPE_COUNT, UNIT_TYPE_COUNT,
};
pub use report::DecisionReport;
