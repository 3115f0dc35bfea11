//! Shared domain types for the pick engine.

use serde::{Deserialize, Serialize};

/// Side of a two-sided line (totals, player props).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Over,
    Under,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Over => "Over",
            Side::Under => "Under",
        }
    }
}

/// Closed taxonomy of the market kinds the conflict checks care about.
///
/// Produced once at the normalizer boundary so the validator matches on a
/// tagged enum instead of re-parsing free-text market names at every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    Moneyline,
    PointSpread,
    /// "Player Touchdowns" anytime-scorer props. First/last-touchdown-scorer
    /// markets are a different proposition and classify as [`MarketKind::Other`].
    AnytimeTouchdown,
    Other,
}

impl MarketKind {
    /// Classify a free-text market name (case-insensitive substring match).
    pub fn from_market_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("moneyline") {
            MarketKind::Moneyline
        } else if lower.contains("point spread") {
            MarketKind::PointSpread
        } else if lower.contains("player touchdowns") {
            MarketKind::AnytimeTouchdown
        } else {
            MarketKind::Other
        }
    }

    /// Moneyline and spread legs carry a team-side correlation key.
    pub fn is_team_market(&self) -> bool {
        matches!(self, MarketKind::Moneyline | MarketKind::PointSpread)
    }
}

/// Game period a market settles on, derived from the market name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1st Half")]
    FirstHalf,
    #[serde(rename = "2nd Half")]
    SecondHalf,
    #[serde(rename = "1st Quarter")]
    FirstQuarter,
    #[serde(rename = "2nd Quarter")]
    SecondQuarter,
    #[serde(rename = "3rd Quarter")]
    ThirdQuarter,
    #[serde(rename = "4th Quarter")]
    FourthQuarter,
    #[serde(rename = "Full Game")]
    FullGame,
}

impl Period {
    /// The six prefixed period labels; anything else is full-game.
    const PREFIXED: [Period; 6] = [
        Period::FirstHalf,
        Period::SecondHalf,
        Period::FirstQuarter,
        Period::SecondQuarter,
        Period::ThirdQuarter,
        Period::FourthQuarter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::FirstHalf => "1st Half",
            Period::SecondHalf => "2nd Half",
            Period::FirstQuarter => "1st Quarter",
            Period::SecondQuarter => "2nd Quarter",
            Period::ThirdQuarter => "3rd Quarter",
            Period::FourthQuarter => "4th Quarter",
            Period::FullGame => "Full Game",
        }
    }

    /// Longest-prefix match of the market name against the period labels,
    /// case-insensitive, defaulting to [`Period::FullGame`].
    pub fn from_market_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        let mut best: Option<(usize, Period)> = None;
        for period in Period::PREFIXED {
            let label = period.label().to_lowercase();
            if lower.starts_with(&label) && best.map_or(true, |(len, _)| label.len() > len) {
                best = Some((label.len(), period));
            }
        }
        best.map_or(Period::FullGame, |(_, period)| period)
    }
}

/// Settlement state of a leg or pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Void,
    Pending,
    /// The book no longer lists the selection; settles like a void.
    NotFound,
}

/// Which leaderboard a tier/score is computed for.
///
/// Group-leaderboard scoring caps long-shot tiers so one moonshot pick cannot
/// swing a group's internal standings; global scoring is uncapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringMode {
    Global,
    GroupLeaderboard,
}

/// One selected outcome on one market: the atomic unit of a pick.
///
/// Built by [`crate::normalizer::normalize`]; the three derived correlation
/// keys are what the parlay conflict checks compare. Serializes in camelCase
/// to match the persisted pick record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Opaque id, unique per offered selection.
    pub id: String,
    pub event_id: String,
    /// Free-text market name as offered by the book (e.g. "Point Spread").
    pub market: String,
    pub kind: MarketKind,
    pub display_name: String,
    /// American odds; absent when the quote carried no price.
    pub price: Option<i32>,
    /// Book-assigned market id from the offer deep link; empty if unrecoverable.
    pub book_market_id: String,
    /// Book-assigned selection id from the offer deep link; empty if unrecoverable.
    pub book_selection_id: String,
    /// Present only for player-prop markets.
    pub player_id: Option<String>,
    /// Numeric threshold for two-sided lines (e.g. 51.5).
    pub line: Option<f64>,
    pub side: Option<Side>,
    /// `event:bookMarketId`, one specific offered market instance. Degrades
    /// to `event:market` granularity when the book market id is unrecoverable.
    pub market_key: String,
    /// `event:market[:player:<id>]`, the family of alternate lines/sides a
    /// book treats as the same underlying proposition.
    pub family_key: String,
    /// Set only for moneyline/spread legs: this team's side of the market type.
    pub team_key: Option<String>,
    pub period: Period,
}
