//! Difficulty tiers: the 14-bracket odds table and the tier classifier.
//!
//! The table is an explicit immutable configuration value rather than
//! ambient global state, so tests (and future rebalances) can run against
//! alternate tables. [`TierTable::standard`] caches the production table.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::odds::parse_american_odds;
use crate::types::ScoringMode;

/// One difficulty tier: an American-odds bracket with a point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierMeta {
    /// 1-based index, strictly increasing across the table.
    pub tier: u8,
    /// Unique display label (e.g. "EVEN").
    pub name: String,
    /// Points awarded for a win at this tier.
    pub points: i64,
    /// Inclusive lower odds bound; `None` = unbounded below.
    pub min_odds: Option<i32>,
    /// Inclusive upper odds bound; `None` = unbounded above.
    pub max_odds: Option<i32>,
}

impl TierMeta {
    pub fn contains_odds(&self, odds: i32) -> bool {
        self.min_odds.map_or(true, |lo| odds >= lo) && self.max_odds.map_or(true, |hi| odds <= hi)
    }
}

/// Violations of the tier-table shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,
    #[error("tier indices must start at 1 and increase by 1 (saw {0})")]
    IndexOrder(u8),
    #[error("duplicate tier name {0:?}")]
    DuplicateName(String),
    #[error("tier {0} has non-positive points")]
    NonPositivePoints(u8),
    #[error("tier {0} has fewer points than tier {1}")]
    PointsDecrease(u8, u8),
    #[error("tier 1 must be unbounded below")]
    BoundedBelow,
    #[error("last tier must be unbounded above")]
    BoundedAbove,
    #[error("odds ranges of tiers {0} and {1} leave a gap or overlap")]
    RangeDiscontinuity(u8, u8),
    #[error("group cap tier {0} is not in the table")]
    UnknownCapTier(u8),
}

/// Immutable tier configuration: the ordered brackets plus the scoring
/// constants that belong with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTable {
    tiers: Vec<TierMeta>,
    /// Tiers above this index collapse to it on group leaderboards.
    group_cap_tier: u8,
    /// Fixed penalty for a lost pick, independent of tier.
    loss_penalty: i64,
    /// Hard ceiling on points a single win can add to a group leaderboard.
    group_point_cap: i64,
}

impl TierTable {
    /// Build a table, checking the partition invariants: sequential 1-based
    /// indices, unique names, positive non-decreasing points, tier 1
    /// unbounded below, last tier unbounded above, contiguous ranges in
    /// between (every finite odds value lands in exactly one tier).
    pub fn new(
        tiers: Vec<TierMeta>,
        group_cap_tier: u8,
        loss_penalty: i64,
        group_point_cap: i64,
    ) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }
        for (i, tier) in tiers.iter().enumerate() {
            if tier.tier as usize != i + 1 {
                return Err(TierTableError::IndexOrder(tier.tier));
            }
            if tier.points <= 0 {
                return Err(TierTableError::NonPositivePoints(tier.tier));
            }
            if tiers[..i]
                .iter()
                .any(|t| normalize_label(&t.name) == normalize_label(&tier.name))
            {
                return Err(TierTableError::DuplicateName(tier.name.clone()));
            }
        }
        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.points < prev.points {
                return Err(TierTableError::PointsDecrease(next.tier, prev.tier));
            }
            match (prev.max_odds, next.min_odds) {
                (Some(hi), Some(lo)) if lo == hi + 1 => {}
                _ => return Err(TierTableError::RangeDiscontinuity(prev.tier, next.tier)),
            }
        }
        if tiers[0].min_odds.is_some() {
            return Err(TierTableError::BoundedBelow);
        }
        if tiers[tiers.len() - 1].max_odds.is_some() {
            return Err(TierTableError::BoundedAbove);
        }
        if !tiers.iter().any(|t| t.tier == group_cap_tier) {
            return Err(TierTableError::UnknownCapTier(group_cap_tier));
        }
        Ok(Self {
            tiers,
            group_cap_tier,
            loss_penalty,
            group_point_cap,
        })
    }

    /// The production table: 14 brackets, group cap at tier 6 / 60 points,
    /// flat -10 loss penalty.
    pub fn standard() -> &'static TierTable {
        static STANDARD: OnceLock<TierTable> = OnceLock::new();
        STANDARD.get_or_init(|| {
            TierTable::new(standard_tiers(), 6, -10, 60)
                .expect("standard tier table satisfies its own invariants")
        })
    }

    pub fn tiers(&self) -> &[TierMeta] {
        &self.tiers
    }

    pub fn tier_by_index(&self, index: u8) -> Option<&TierMeta> {
        self.tiers.iter().find(|t| t.tier == index)
    }

    pub fn group_cap_tier(&self) -> u8 {
        self.group_cap_tier
    }

    pub fn loss_penalty(&self) -> i64 {
        self.loss_penalty
    }

    pub fn group_point_cap(&self) -> i64 {
        self.group_point_cap
    }

    /// Resolve a tier from odds, label, or raw points, in that order.
    ///
    /// Returns `None` when nothing resolves; the caller decides what an
    /// unknown tier means (typically a manual-selection prompt).
    pub fn classify(&self, input: &ClassifyInput, mode: ScoringMode) -> Option<TierMeta> {
        let resolved = RESOLVERS.iter().find_map(|resolve| resolve(self, input));
        let Some(tier) = resolved else {
            debug!(?input, "no tier resolvable");
            return None;
        };
        Some(self.apply_group_cap(tier, mode))
    }

    /// On group leaderboards a long-shot tier collapses to the cap tier,
    /// label and points both: a tier-9 win displays and scores as tier 6.
    fn apply_group_cap(&self, tier: TierMeta, mode: ScoringMode) -> TierMeta {
        if mode == ScoringMode::GroupLeaderboard && tier.tier > self.group_cap_tier {
            if let Some(cap) = self.tier_by_index(self.group_cap_tier) {
                return cap.clone();
            }
        }
        tier
    }
}

/// Classifier input: whichever of the three sources the caller has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyInput {
    /// Free-text odds as displayed (e.g. "+140").
    pub odds: Option<String>,
    /// Tier display name or a legacy difficulty label.
    pub label: Option<String>,
    /// Raw point value previously stored on a pick; sign is ignored.
    pub points: Option<i64>,
}

impl ClassifyInput {
    pub fn from_odds(odds: impl Into<String>) -> Self {
        Self {
            odds: Some(odds.into()),
            ..Self::default()
        }
    }

    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn from_points(points: i64) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }
}

type Resolver = fn(&TierTable, &ClassifyInput) -> Option<TierMeta>;

/// Resolution precedence, first match wins: odds, then label, then points.
const RESOLVERS: &[Resolver] = &[resolve_by_odds, resolve_by_label, resolve_by_points];

fn resolve_by_odds(table: &TierTable, input: &ClassifyInput) -> Option<TierMeta> {
    let odds = input.odds.as_deref().and_then(parse_american_odds)?;
    table.tiers.iter().find(|t| t.contains_odds(odds)).cloned()
}

/// Legacy three-to-five-bucket difficulty labels from the old pick builder.
static LEGACY_LABELS: &[(&str, u8)] = &[
    ("very safe", 1),
    ("safe", 2),
    ("balanced", 3),
    ("risky", 5),
    ("moonshot", 8),
];

fn resolve_by_label(table: &TierTable, input: &ClassifyInput) -> Option<TierMeta> {
    let label = normalize_label(input.label.as_deref()?);
    if label.is_empty() {
        return None;
    }
    if let Some(tier) = table
        .tiers
        .iter()
        .find(|t| normalize_label(&t.name) == label)
    {
        return Some(tier.clone());
    }
    LEGACY_LABELS
        .iter()
        .find(|(legacy, _)| *legacy == label)
        .and_then(|(_, index)| table.tier_by_index(*index).cloned())
}

fn resolve_by_points(table: &TierTable, input: &ClassifyInput) -> Option<TierMeta> {
    let points = input.points?.abs();
    table.tiers.iter().find(|t| t.points == points).cloned()
}

/// Case/whitespace normalization for label matching.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn standard_tiers() -> Vec<TierMeta> {
    let t = |tier, name: &str, points, min_odds, max_odds| TierMeta {
        tier,
        name: name.to_string(),
        points,
        min_odds,
        max_odds,
    };
    vec![
        t(1, "LOCK", 10, None, Some(-300)),
        t(2, "HEAVY", 15, Some(-299), Some(-150)),
        t(3, "EVEN", 25, Some(-149), Some(150)),
        t(4, "PLUS", 35, Some(151), Some(300)),
        t(5, "STRETCH", 45, Some(301), Some(600)),
        t(6, "EDGE", 60, Some(601), Some(1000)),
        t(7, "SPICY", 70, Some(1001), Some(1500)),
        t(8, "DEEP", 85, Some(1501), Some(3000)),
        t(9, "EPIC", 100, Some(3001), Some(10000)),
        t(10, "WILD", 125, Some(10001), Some(15000)),
        t(11, "COSMIC", 150, Some(15001), Some(25000)),
        t(12, "MIRACLE", 200, Some(25001), Some(50000)),
        t(13, "LEGEND", 250, Some(50001), Some(100000)),
        t(14, "HAIL MARY", 300, Some(100001), None),
    ]
}

/// Classify against the standard production table.
pub fn classify(input: &ClassifyInput, mode: ScoringMode) -> Option<TierMeta> {
    TierTable::standard().classify(input, mode)
}
