use std::collections::HashMap;

use crate::models::{Star, UserSubmission};

const PERMILLE: i64 = 1000;

/// Best bonus per `(day, star)` slot. Competing claims for the same slot do
/// not stack; only the highest one is kept.
pub fn best_bonus_per_slot(submissions: &[UserSubmission]) -> HashMap<(u32, Star), i64> {
    let mut best: HashMap<(u32, Star), i64> = HashMap::new();

    for submission in submissions {
        best.entry(submission.slot())
            .and_modify(|bonus| *bonus = (*bonus).max(submission.bonus_permille))
            .or_insert(submission.bonus_permille);
    }

    best
}

/// Sum of the per-slot best bonuses, in permille.
pub fn total_bonus_permille(submissions: &[UserSubmission]) -> i64 {
    best_bonus_per_slot(submissions).values().sum()
}

/// Applies language bonuses to a base leaderboard score.
///
/// Result is `floor(base_score * (1 + total_bonus / 1000))`, computed in
/// integers. A zero base score never earns a bonus. Results outside the
/// `i64` range saturate.
pub fn adjusted_score(base_score: i64, submissions: &[UserSubmission]) -> i64 {
    if base_score == 0 || submissions.is_empty() {
        return base_score;
    }

    let multiplier = i128::from(PERMILLE) + i128::from(total_bonus_permille(submissions));
    let scaled = (i128::from(base_score) * multiplier).div_euclid(i128::from(PERMILLE));

    i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
}
