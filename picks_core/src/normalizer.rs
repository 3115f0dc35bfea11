//! Odds normalizer: turns one raw sportsbook quote into a canonical [`Leg`].
//!
//! This is the only place market names are parsed and correlation keys are
//! built; everything downstream (the conflict validator in particular)
//! operates on the closed [`MarketKind`]/[`Period`] enums and the derived
//! keys. Absent or malformed fields degrade to permissive defaults rather
//! than failing, because a correlation check must never take down the pick
//! builder.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::odds::parse_american_odds;
use crate::types::{Leg, MarketKind, Period, Side};

/// Event descriptor from the schedule feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
}

/// One raw odds quote from the board, exactly as the feed hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOdd {
    /// Opaque id, unique per offered selection.
    pub id: String,
    /// Free-text market name (e.g. "Point Spread", "Player Touchdowns").
    pub market: String,
    /// Selection display text (team, player, or outcome name).
    pub selection: String,
    /// Pre-formatted price text from the board (e.g. "+140"), if priced.
    pub price: Option<String>,
    /// Player id for player-prop markets.
    pub player_id: Option<String>,
    /// Numeric threshold for two-sided lines.
    pub line: Option<f64>,
    pub side: Option<Side>,
    /// Offer deep link carrying `marketId`/`selectionId` query parameters.
    pub deep_link: String,
}

/// Recover the book's market/selection ids from an offer deep link.
///
/// Malformed links or missing parameters resolve to empty strings; the
/// derived keys then work at event+market granularity instead.
fn parse_deep_link(link: &str) -> (String, String) {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(_) => {
            debug!(link, "unparseable deep link, keys degrade to event+market");
            return (String::new(), String::new());
        }
    };
    let mut market_id = String::new();
    let mut selection_id = String::new();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "marketId" => market_id = value.into_owned(),
            "selectionId" => selection_id = value.into_owned(),
            _ => {}
        }
    }
    (market_id, selection_id)
}

/// Convert one raw quote into a canonical [`Leg`] with correlation keys.
///
/// Pure transform: no I/O, no failure path.
pub fn normalize(event: &EventInfo, raw: &RawOdd) -> Leg {
    let (book_market_id, book_selection_id) = parse_deep_link(&raw.deep_link);
    let kind = MarketKind::from_market_name(&raw.market);
    let period = Period::from_market_name(&raw.market);

    // One specific offered market instance, falling back to the market text
    // when the book id is unrecoverable.
    let market_key = if book_market_id.is_empty() {
        format!("{}:{}", event.id, raw.market)
    } else {
        format!("{}:{}", event.id, book_market_id)
    };

    // The family of alternate lines/sides, scoped to the player for props.
    let family_key = match &raw.player_id {
        Some(player) => format!("{}:{}:player:{}", event.id, raw.market, player),
        None => format!("{}:{}", event.id, raw.market),
    };

    // A team's side of a moneyline/spread market, used by the correlation check.
    let team_key = if kind.is_team_market() && !book_selection_id.is_empty() {
        Some(book_selection_id.clone())
    } else {
        None
    };

    let display_name = match (raw.side, raw.line) {
        (Some(side), Some(line)) => format!("{} {} {}", raw.selection, side.as_str(), line),
        _ => raw.selection.clone(),
    };

    Leg {
        id: raw.id.clone(),
        event_id: event.id.clone(),
        market: raw.market.clone(),
        kind,
        display_name,
        price: raw.price.as_deref().and_then(parse_american_odds),
        book_market_id,
        book_selection_id,
        player_id: raw.player_id.clone(),
        line: raw.line,
        side: raw.side,
        market_key,
        family_key,
        team_key,
        period,
    }
}
