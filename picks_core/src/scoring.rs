//! Scoring: settled outcome x tier -> point delta.

use tracing::debug;

use crate::tiers::{TierMeta, TierTable};
use crate::types::{Outcome, ScoringMode};

impl TierTable {
    /// Point delta for a settled pick.
    ///
    /// Losses cost the flat penalty regardless of tier; voids, pending and
    /// not-found settle at zero. A win pays the tier's points, re-clamped to
    /// the group ceiling in group mode because tiers can arrive out-of-band
    /// (pre-computed and stored on the pick) without passing through
    /// [`TierTable::classify`]. A win with no resolvable tier scores zero.
    pub fn score(&self, outcome: Outcome, tier: Option<&TierMeta>, mode: ScoringMode) -> i64 {
        match outcome {
            Outcome::Loss => self.loss_penalty(),
            Outcome::Void | Outcome::NotFound | Outcome::Pending => 0,
            Outcome::Win => {
                let Some(tier) = tier else {
                    debug!("win with no resolvable tier scores zero");
                    return 0;
                };
                match mode {
                    ScoringMode::Global => tier.points,
                    ScoringMode::GroupLeaderboard => tier.points.min(self.group_point_cap()),
                }
            }
        }
    }
}

/// Score against the standard production table.
pub fn score(outcome: Outcome, tier: Option<&TierMeta>, mode: ScoringMode) -> i64 {
    TierTable::standard().score(outcome, tier, mode)
}

/// Fold per-leg settlements into one pick-level outcome.
///
/// Any lost leg loses the pick; otherwise an unresolved leg leaves it
/// pending; a pick whose legs all voided (or vanished from the board) is a
/// void; anything left is a win over the surviving legs.
pub fn combine_outcomes(outcomes: &[Outcome]) -> Outcome {
    if outcomes.is_empty() {
        return Outcome::Void;
    }
    if outcomes.contains(&Outcome::Loss) {
        return Outcome::Loss;
    }
    if outcomes.contains(&Outcome::Pending) {
        return Outcome::Pending;
    }
    if outcomes
        .iter()
        .all(|o| matches!(o, Outcome::Void | Outcome::NotFound))
    {
        return Outcome::Void;
    }
    Outcome::Win
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::ClassifyInput;

    fn tier(index: u8) -> TierMeta {
        TierTable::standard()
            .tier_by_index(index)
            .expect("standard table tier")
            .clone()
    }

    #[test]
    fn loss_is_flat_penalty_in_every_mode_and_tier() {
        for t in [1, 3, 6, 14] {
            for mode in [ScoringMode::Global, ScoringMode::GroupLeaderboard] {
                assert_eq!(score(Outcome::Loss, Some(&tier(t)), mode), -10);
            }
        }
        // Even with no tier at all
        assert_eq!(score(Outcome::Loss, None, ScoringMode::Global), -10);
    }

    #[test]
    fn unresolved_and_void_outcomes_score_zero() {
        for outcome in [Outcome::Void, Outcome::Pending, Outcome::NotFound] {
            assert_eq!(score(outcome, Some(&tier(9)), ScoringMode::Global), 0);
        }
    }

    #[test]
    fn win_pays_tier_points() {
        assert_eq!(score(Outcome::Win, Some(&tier(3)), ScoringMode::Global), 25);
        assert_eq!(
            score(Outcome::Win, Some(&tier(3)), ScoringMode::GroupLeaderboard),
            25
        );
        assert_eq!(
            score(Outcome::Win, Some(&tier(9)), ScoringMode::Global),
            100
        );
    }

    #[test]
    fn group_mode_reclamps_out_of_band_tiers() {
        // A tier stored on an old pick with inflated points must still hit
        // the ceiling in group mode.
        let inflated = TierMeta {
            points: 999,
            ..tier(6)
        };
        assert_eq!(
            score(Outcome::Win, Some(&inflated), ScoringMode::GroupLeaderboard),
            60
        );
        assert_eq!(
            score(Outcome::Win, Some(&inflated), ScoringMode::Global),
            999
        );
    }

    #[test]
    fn unscoreable_win_scores_zero() {
        assert_eq!(score(Outcome::Win, None, ScoringMode::Global), 0);
    }

    #[test]
    fn classify_then_score_concrete_scenario() {
        // +140 -> tier 3 "EVEN" -> 25 points in both modes; +9000 -> tier 9
        // globally (100 points) but clamps to the tier-6 value in group mode.
        let t3 = crate::tiers::classify(&ClassifyInput::from_odds("+140"), ScoringMode::Global)
            .unwrap();
        assert_eq!(score(Outcome::Win, Some(&t3), ScoringMode::Global), 25);
        assert_eq!(
            score(Outcome::Win, Some(&t3), ScoringMode::GroupLeaderboard),
            25
        );

        let t9 = crate::tiers::classify(&ClassifyInput::from_odds("+9000"), ScoringMode::Global)
            .unwrap();
        assert_eq!(score(Outcome::Win, Some(&t9), ScoringMode::Global), 100);
        assert_eq!(
            score(Outcome::Win, Some(&t9), ScoringMode::GroupLeaderboard),
            60
        );

        let capped = crate::tiers::classify(
            &ClassifyInput::from_odds("+9000"),
            ScoringMode::GroupLeaderboard,
        )
        .unwrap();
        assert!(capped.points <= 60);
        assert_eq!(
            score(Outcome::Win, Some(&capped), ScoringMode::GroupLeaderboard),
            60
        );
    }

    #[test]
    fn combine_outcomes_folds_leg_settlements() {
        use Outcome::*;
        assert_eq!(combine_outcomes(&[Win, Win, Win]), Win);
        assert_eq!(combine_outcomes(&[Win, Loss, Win]), Loss);
        assert_eq!(combine_outcomes(&[Win, Pending]), Pending);
        // A loss settles the pick even with legs still pending
        assert_eq!(combine_outcomes(&[Loss, Pending]), Loss);
        assert_eq!(combine_outcomes(&[Void, Void]), Void);
        assert_eq!(combine_outcomes(&[Void, NotFound]), Void);
        // Voided legs drop out; the rest decide the pick
        assert_eq!(combine_outcomes(&[Win, Void]), Win);
        assert_eq!(combine_outcomes(&[]), Void);
    }
}
