use itertools::Itertools;
use rand::Rng;

use crate::{LeaderboardEntry, TierLabel, UserRecord, UserStats, DEFAULT_REFERRAL_CODE};

/// Projects an unordered set of user records onto the leaderboard: sorted by
/// total donations descending, `rank = index + 1`. The sort is stable, so
/// records with equal totals keep their input order. Output length always
/// equals input length.
pub fn compute_leaderboard(records: &[UserRecord]) -> Vec<LeaderboardEntry> {
    records
        .iter()
        .sorted_by(|a, b| b.donations_raised.total_cmp(&a.donations_raised))
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            record: record.clone(),
            rank: index as u64 + 1,
        })
        .collect()
}

/// Derives one user's statistics from the full record set.
///
/// A missing `user_id` degrades to the documented defaults (zero raised,
/// Bronze, rank N + 1, fallback referral code) instead of failing; the read
/// path favors availability over correctness. `monthly_growth` comes from
/// the caller's RNG on every call, so repeated calls are not idempotent.
pub fn compute_user_stats(user_id: &str, records: &[UserRecord], rng: &mut impl Rng) -> UserStats {
    let monthly_growth = mock_monthly_growth(rng);
    let board = compute_leaderboard(records);

    match board.iter().find(|entry| entry.record.id == user_id) {
        Some(entry) => UserStats {
            total_raised: entry.record.donations_raised,
            tier_label: entry.record.tier.unwrap_or_default(),
            rank_position: entry.rank,
            monthly_growth,
            referral_code: entry.record.referral_code.clone(),
        },
        None => UserStats {
            total_raised: 0.0,
            tier_label: TierLabel::Bronze,
            rank_position: records.len() as u64 + 1,
            monthly_growth,
            referral_code: DEFAULT_REFERRAL_CODE.to_string(),
        },
    }
}

/// Placeholder growth figure, uniform in [10, 39]. Kept injectable so tests
/// control the source; callers must only ever assert the range.
pub fn mock_monthly_growth(rng: &mut impl Rng) -> u32 {
    rng.gen_range(10..=39)
}
