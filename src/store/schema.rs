use serde::Serialize;

use crate::engine::scoring::GameScore;

/// On-disk shape of one day's score: the attempt plus the identity of the
/// device-local player at write time (`None` = anonymous).
///
/// The identity is written under both its canonical and legacy field names on
/// every save, so readers from before the rename still resolve it. Reads do
/// not deserialize this type directly; they go through
/// [`crate::store::normalize::normalize_stored_daily_score`], which tolerates
/// legacy and partially corrupted records.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDailyScore {
    #[serde(flatten)]
    pub score: GameScore,
    pub local_user_id: Option<String>,
    /// Legacy mirror of `local_user_id`. Always equal to it.
    #[serde(rename = "userId")]
    pub legacy_user_id: Option<String>,
}

impl StoredDailyScore {
    pub fn new(score: GameScore, local_user_id: Option<String>) -> Self {
        Self {
            score,
            legacy_user_id: local_user_id.clone(),
            local_user_id,
        }
    }
}

/// An anonymous score that was already submitted remotely and can be claimed
/// by a user who signs in afterward.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableAnonymousScore {
    pub score_id: String,
    pub score: u32,
    pub time_seconds: u32,
    pub mistakes: u32,
    pub correct_placements: u32,
}
