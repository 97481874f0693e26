use super::models::{ApiResponse, DayLevel, Member};
use crate::{ImporterError, Result};
use storage::models::{Completion, CompletionSet, LeaderboardSnapshot, SnapshotMember};
use storage::repository::leaderboard::anonymous_name;
use tracing::{debug, warn};

/// Normalises a raw leaderboard payload into a [`LeaderboardSnapshot`].
pub struct AocTransformer;

impl AocTransformer {
    pub fn into_snapshot(response: ApiResponse) -> Result<LeaderboardSnapshot> {
        let year: i32 = response.event.trim().parse().map_err(|_| {
            ImporterError::TransformationError(format!("Invalid event year '{}'", response.event))
        })?;

        let mut members: Vec<SnapshotMember> = response
            .members
            .into_values()
            .map(Self::member)
            .collect();
        members.sort_by_key(|m| m.user_id);

        Ok(LeaderboardSnapshot {
            year,
            owner_id: response.owner_id,
            members,
        })
    }

    fn member(member: Member) -> SnapshotMember {
        let name = member
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| anonymous_name(member.id));

        let completions = Self::completions(member.id, &member.completion_day_level);
        debug!(
            "Member {} ({}): {} points, {} stars",
            member.id,
            name,
            member.local_score,
            completions.total_stars()
        );

        SnapshotMember {
            user_id: member.id,
            name,
            local_score: member.local_score,
            completions,
        }
    }

    fn completions(
        user_id: i64,
        levels: &std::collections::HashMap<String, DayLevel>,
    ) -> CompletionSet {
        levels
            .iter()
            .filter_map(|(day, level)| match day.parse::<u32>() {
                Ok(day) if day > 0 => Some((
                    day,
                    Completion {
                        star1: level.star1.is_some(),
                        star2: level.star2.is_some(),
                    },
                )),
                _ => {
                    warn!("Skipping invalid day '{}' for member {}", day, user_id);
                    None
                }
            })
            .collect()
    }
}
