//! Validation and migration of locally persisted scores.
//!
//! Whatever was stored may be well-formed, legacy-shaped, partially written,
//! or garbage. Every function here is total: invalid input degrades to
//! `None`, never an error. The local cache is advisory; losing it costs the
//! player a progress readout, never gameplay correctness.

use serde_json::Value;

use crate::engine::scoring::{GRID_CELLS, GameScore};
use crate::store::schema::{ClaimableAnonymousScore, StoredDailyScore};

/// Canonical identity field name in stored records.
pub const LOCAL_USER_ID_FIELD: &str = "localUserId";

/// Identity field names from earlier schema revisions, in fallback priority
/// order. Kept in one place so the list can be deleted once obsolete.
pub const LEGACY_USER_ID_FIELDS: &[&str] = &["userId"];

/// Parse stored text, treating corrupted bytes as "no value" rather than
/// propagating a parse error. All storage reads funnel through this.
pub fn safe_json_parse(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// A stored metric must be a JSON number. Fractional or negative values
/// (seen after partial writes) are squashed toward the valid range rather
/// than rejected; only non-numbers reject.
fn coerce_metric(value: &Value) -> Option<u32> {
    value.as_f64().map(|n| n.floor().max(0.0) as u32)
}

/// Rebuild a [`GameScore`] from an untyped stored value.
///
/// All four numeric fields must be present and numeric; any one missing or
/// mistyped rejects the whole record (no partial recovery). A missing or
/// non-boolean `completed` is inferred from a full grid, which is a default,
/// not an error. `percentile` and `scoreId` pass through when well-typed and
/// are dropped otherwise.
pub fn coerce_game_score(value: &Value) -> Option<GameScore> {
    let record = value.as_object()?;
    let score = coerce_metric(record.get("score")?)?;
    let time_seconds = coerce_metric(record.get("timeSeconds")?)?;
    let mistakes = coerce_metric(record.get("mistakes")?)?;
    let correct_placements = coerce_metric(record.get("correctPlacements")?)?;
    let completed = match record.get("completed") {
        Some(Value::Bool(completed)) => *completed,
        _ => correct_placements == GRID_CELLS,
    };
    let percentile = record.get("percentile").and_then(Value::as_f64);
    let score_id = record
        .get("scoreId")
        .and_then(Value::as_str)
        .map(str::to_owned);
    Some(GameScore {
        time_seconds,
        mistakes,
        correct_placements,
        score,
        completed,
        percentile,
        score_id,
    })
}

/// Resolve the stored identity: canonical field first, then each legacy
/// alias. `Some(Some(id))` is a signed-in user, `Some(None)` an explicit
/// anonymous marker, and `None` means no field held a string or null (absent
/// and mistyped collapse together).
pub fn stored_local_user_id(value: &Value) -> Option<Option<String>> {
    let record = value.as_object()?;
    std::iter::once(LOCAL_USER_ID_FIELD)
        .chain(LEGACY_USER_ID_FIELDS.iter().copied())
        .find_map(|field| match record.get(field) {
            Some(Value::String(id)) => Some(Some(id.clone())),
            Some(Value::Null) => Some(None),
            _ => None,
        })
}

/// Migrate an untyped stored value into a [`StoredDailyScore`].
///
/// Rejects if the score fields do not coerce. An unresolvable identity
/// defaults to anonymous, and the output stamps the identity under both the
/// canonical and legacy names so any downstream reader finds it.
pub fn normalize_stored_daily_score(value: &Value) -> Option<StoredDailyScore> {
    let score = coerce_game_score(value)?;
    let local_user_id = stored_local_user_id(value).unwrap_or(None);
    Some(StoredDailyScore::new(score, local_user_id))
}

/// Write-side counterpart of [`normalize_stored_daily_score`]: tag a score
/// with its owner, stamping both identity field names.
pub fn serialize_stored_daily_score(
    score: GameScore,
    local_user_id: Option<String>,
) -> StoredDailyScore {
    StoredDailyScore::new(score, local_user_id)
}

/// Pull out a score eligible for the anonymous-to-signed-in migration.
///
/// Non-`None` only when the stored identity is an explicit anonymous marker
/// AND the score was already submitted remotely (has a `scoreId`) AND the
/// numeric fields coerce. A score owned by a real user is never claimable,
/// even with a `scoreId` present.
pub fn extract_claimable_anonymous_score(value: &Value) -> Option<ClaimableAnonymousScore> {
    if !matches!(stored_local_user_id(value), Some(None)) {
        return None;
    }
    let score = coerce_game_score(value)?;
    let score_id = score.score_id?;
    Some(ClaimableAnonymousScore {
        score_id,
        score: score.score,
        time_seconds: score.time_seconds,
        mistakes: score.mistakes,
        correct_placements: score.correct_placements,
    })
}
