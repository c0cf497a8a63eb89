//! Leaderboard ranking arithmetic.
//!
//! Rank is `1 + count(accounts with strictly greater points)`: accounts with
//! equal points share the same rank value. Ties in top-N listings break by
//! account creation order, never by score shuffling.

use carddrop_types::LeaderboardEntry;

/// 1-based rank of a `points` value within the given snapshot.
pub fn rank_for(points: u64, all_points: impl IntoIterator<Item = u64>) -> u64 {
    1 + all_points.into_iter().filter(|other| *other > points).count() as u64
}

/// Order a `(creation_seq, entry)` snapshot for a top-N listing: descending
/// points, creation order on ties. Stable across calls for an unchanged
/// snapshot.
pub fn order_snapshot(snapshot: &mut [(u64, LeaderboardEntry)]) {
    snapshot.sort_by(|(seq_a, a), (seq_b, b)| {
        b.points.cmp(&a.points).then(seq_a.cmp(seq_b))
    });
}
