pub mod score;
pub mod streak;
pub mod leaderboard;

use chrono::{DateTime, Utc};

/// The four numbers a participant's score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ScoreInputs {
    pub total_premium: f64,
    /// Sum of payout minus premium; negative for a losing trader.
    pub total_profit: f64,
    pub trade_count: u64,
    pub streak_days: u64,
}

/// A trade that has reached settlement, as read from the indexer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SettledTrade {
    pub participant: String,
    /// Amount paid to open.
    pub premium: f64,
    /// Gross payout received at settlement.
    pub payout: f64,
    pub settled_at: DateTime<Utc>,
}

impl SettledTrade {
    #[inline]
    pub fn profit(&self) -> f64 {
        self.payout - self.premium
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LeaderboardEntry {
    /// 1-based; equal scores share a rank.
    pub rank: u32,
    pub participant: String,
    pub inputs: ScoreInputs,
    pub score: f64,
}
