use crate::tournament::score::score_breakdown;
use crate::tournament::streak::longest_streak;
use crate::tournament::{LeaderboardEntry, ScoreInputs, SettledTrade};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Fold one participant's settled trades into score inputs.
/// Streak days are counted over the UTC calendar dates of settlement.
pub fn aggregate<'a, I>(trades: I, day_length: Duration) -> ScoreInputs
where
    I: IntoIterator<Item = &'a SettledTrade>,
{
    let mut inputs = ScoreInputs::default();
    let mut dates: Vec<NaiveDate> = Vec::new();

    for trade in trades {
        inputs.total_premium += trade.premium;
        inputs.total_profit += trade.profit();
        inputs.trade_count += 1;
        dates.push(trade.settled_at.date_naive());
    }

    inputs.streak_days = u64::from(longest_streak(&dates, day_length));
    inputs
}

/// Score every participant and order them best first.
///
/// Ties on score are broken by participant name so the order is stable, and
/// tied participants share a rank (1, 1, 3).
pub fn rank(trades: &[SettledTrade], day_length: Duration) -> Vec<LeaderboardEntry> {
    let mut by_participant: BTreeMap<&str, Vec<&SettledTrade>> = BTreeMap::new();
    for trade in trades {
        by_participant
            .entry(trade.participant.as_str())
            .or_default()
            .push(trade);
    }

    let mut entries: Vec<LeaderboardEntry> = by_participant
        .into_iter()
        .map(|(participant, trades)| {
            let inputs = aggregate(trades, day_length);
            LeaderboardEntry {
                rank: 0,
                participant: participant.to_string(),
                inputs,
                score: score_breakdown(&inputs).score,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.participant.cmp(&b.participant))
    });

    let mut prev_score: Option<f64> = None;
    let mut prev_rank: u32 = 0;
    for (i, entry) in entries.iter_mut().enumerate() {
        let position = i as u32 + 1;
        entry.rank = match prev_score {
            Some(s) if s == entry.score => prev_rank,
            _ => position,
        };
        prev_score = Some(entry.score);
        prev_rank = entry.rank;
    }

    tracing::info!(
        participants = entries.len(),
        trades = trades.len(),
        top_score = entries.first().map(|e| e.score).unwrap_or(0.0),
        "leaderboard ranked"
    );

    entries
}
