//! Pick scoring and same-game-parlay conflict engine.
//!
//! This crate provides:
//! - Odds normalization: raw sportsbook quotes become canonical [`Leg`]
//!   records with derived correlation keys
//! - A 14-tier difficulty classifier over American odds, legacy difficulty
//!   labels, and stored point values
//! - Win/loss scoring, with a capped variant for intra-group leaderboards
//! - Parlay conflict validation: duplicate outcomes, one outcome per market,
//!   alternate-line stacking, moneyline/spread correlation, anytime-TD dedup
//!
//! Every entry point is a synchronous pure function over caller-owned
//! snapshots: no I/O, no global mutable state, and a defined result for
//! every input. The pick-builder UI and the grading pipeline live outside
//! this crate and call in through [`normalize`], [`validate_add_leg`],
//! [`classify`] and [`score`].

pub mod normalizer;
pub mod odds;
pub mod scoring;
pub mod tiers;
pub mod types;
pub mod validator;

pub use normalizer::{normalize, EventInfo, RawOdd};
pub use odds::{
    american_to_decimal, combined_american_odds, decimal_to_american, implied_probability,
    parse_american_odds,
};
pub use scoring::{combine_outcomes, score};
pub use tiers::{classify, ClassifyInput, TierMeta, TierTable, TierTableError};
pub use types::{Leg, MarketKind, Outcome, Period, ScoringMode, Side};
pub use validator::{validate_add_leg, RejectReason, ValidateResult};
