//! Parlay conflict validator.
//!
//! Decides whether a candidate leg may join the legs already accepted into a
//! combo pick, applying sportsbook correlation rules in a fixed order. The
//! first failing check wins and names the existing leg it conflicts with.
//! Rejection is an expected, frequent, correct outcome, surfaced as a value
//! with user-facing text, never as an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Leg, MarketKind};

/// Why a candidate leg cannot join the combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    AnytimeTdAlreadyPicked,
    DuplicateSelection,
    MarketAlreadyUsed,
    AlternateLineConflict,
    MoneylineSpreadCorrelated,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::AnytimeTdAlreadyPicked => {
                "You already have an anytime touchdown pick for this player"
            }
            RejectReason::DuplicateSelection => "This outcome is already in your pick",
            RejectReason::MarketAlreadyUsed => {
                "You already picked an outcome from this market"
            }
            RejectReason::AlternateLineConflict => {
                "This line overlaps an alternate line already in your pick"
            }
            RejectReason::MoneylineSpreadCorrelated => {
                "A team's moneyline and spread can't be combined for the same period"
            }
        };
        f.write_str(text)
    }
}

/// Accept/reject decision for adding one leg to a combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidateResult {
    Accept,
    Reject {
        reason: RejectReason,
        /// Id of the existing leg the candidate conflicts with.
        #[serde(rename = "conflictLegId")]
        conflict_leg_id: String,
    },
}

impl ValidateResult {
    pub fn is_accept(&self) -> bool {
        matches!(self, ValidateResult::Accept)
    }
}

/// Decide whether `incoming` may be appended to the combo holding `existing`.
///
/// Pure and idempotent over its inputs; re-validating an accepted set leg by
/// leg reproduces the same decisions. Checks run in order: anytime-TD
/// per-player dedup, exact duplicate, one outcome per market, alternate-line
/// family exclusivity, moneyline/spread correlation.
pub fn validate_add_leg(existing: &[Leg], incoming: &Leg) -> ValidateResult {
    let rejection = check_anytime_td_dedup(existing, incoming)
        .or_else(|| check_exact_duplicate(existing, incoming))
        .or_else(|| check_one_outcome_per_market(existing, incoming))
        .or_else(|| check_alternate_line_family(existing, incoming))
        .or_else(|| check_moneyline_spread_correlation(existing, incoming));

    match rejection {
        Some((reason, conflict_leg_id)) => {
            debug!(
                incoming = %incoming.id,
                conflict = %conflict_leg_id,
                %reason,
                "leg rejected"
            );
            ValidateResult::Reject {
                reason,
                conflict_leg_id,
            }
        }
        None => ValidateResult::Accept,
    }
}

/// A combo may hold at most one anytime-TD line per player, but any number
/// of them across different players.
fn check_anytime_td_dedup(existing: &[Leg], incoming: &Leg) -> Option<(RejectReason, String)> {
    if incoming.kind != MarketKind::AnytimeTouchdown {
        return None;
    }
    let player = incoming.player_id.as_ref()?;
    existing
        .iter()
        .find(|leg| {
            leg.kind == MarketKind::AnytimeTouchdown
                && leg.event_id == incoming.event_id
                && leg.player_id.as_ref() == Some(player)
        })
        .map(|leg| (RejectReason::AnytimeTdAlreadyPicked, leg.id.clone()))
}

/// Re-adding the identical offered outcome: same leg id, or same market
/// instance with the same recovered selection id.
fn check_exact_duplicate(existing: &[Leg], incoming: &Leg) -> Option<(RejectReason, String)> {
    existing
        .iter()
        .find(|leg| {
            leg.id == incoming.id
                || (leg.market_key == incoming.market_key
                    && !incoming.book_selection_id.is_empty()
                    && leg.book_selection_id == incoming.book_selection_id)
        })
        .map(|leg| (RejectReason::DuplicateSelection, leg.id.clone()))
}

/// A market instance contributes at most one selected outcome to a combo.
/// Anytime-TD props share one book market across players and are governed by
/// the per-player dedup instead.
fn check_one_outcome_per_market(existing: &[Leg], incoming: &Leg) -> Option<(RejectReason, String)> {
    existing
        .iter()
        .find(|leg| {
            leg.market_key == incoming.market_key
                && !(leg.kind == MarketKind::AnytimeTouchdown
                    && incoming.kind == MarketKind::AnytimeTouchdown)
        })
        .map(|leg| (RejectReason::MarketAlreadyUsed, leg.id.clone()))
}

/// Two different numeric lines (or sides) of the same underlying proposition
/// cannot stack: same family, different market instance.
fn check_alternate_line_family(existing: &[Leg], incoming: &Leg) -> Option<(RejectReason, String)> {
    existing
        .iter()
        .find(|leg| {
            leg.family_key == incoming.family_key && leg.market_key != incoming.market_key
        })
        .map(|leg| (RejectReason::AlternateLineConflict, leg.id.clone()))
}

/// A book won't price a team's moneyline together with its spread in the
/// same period; the outcomes are too correlated.
fn check_moneyline_spread_correlation(
    existing: &[Leg],
    incoming: &Leg,
) -> Option<(RejectReason, String)> {
    existing
        .iter()
        .find(|leg| {
            let ml_spread_pair = matches!(
                (leg.kind, incoming.kind),
                (MarketKind::Moneyline, MarketKind::PointSpread)
                    | (MarketKind::PointSpread, MarketKind::Moneyline)
            );
            ml_spread_pair
                && leg.event_id == incoming.event_id
                && leg.period == incoming.period
                && match (&leg.team_key, &incoming.team_key) {
                    (Some(a), Some(b)) => !a.is_empty() && a == b,
                    _ => false,
                }
        })
        .map(|leg| (RejectReason::MoneylineSpreadCorrelated, leg.id.clone()))
}
