//! Wyld Fyre Plan - Risk Assessment and Branch Strategy
//!
//! Pure, synchronous decision functions over `wyldfyre-core` plan types:
//! - `assess_risk` classifies a plan as low/medium/high risk
//! - `determine_branch_strategy` recommends where the plan's changes land
//!
//! Neither function performs I/O or can fail: a malformed plan (no steps,
//! no explored files) simply contributes nothing to the score.

pub mod branch;
pub mod risk;

pub use branch::{determine_branch_strategy, suggest_branch_name};
pub use risk::assess_risk;
