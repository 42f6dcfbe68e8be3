use serde::{Deserialize, Serialize};

/// Cells in the standard 4x4 category grid.
pub const GRID_CELLS: u32 = 16;

/// Score one puzzle attempt from its raw metrics.
///
/// `proportional_base` scales linearly with the fraction of cells placed
/// correctly, so partial games never exceed a linear share of the 1000-point
/// maximum. Time costs 2 points per second, each mistake costs 50, and the
/// result is floored at 0.
///
/// Inputs are not validated here: `correct_placements > total_cells` skews the
/// result rather than erroring. Callers sanitize upstream.
pub fn calculate_score(
    time_seconds: u32,
    mistakes: u32,
    correct_placements: u32,
    total_cells: u32,
) -> u32 {
    let proportional_base = ((correct_placements as f64 / total_cells as f64) * 1000.0).floor();
    let time_penalty = time_seconds as f64 * 2.0;
    let mistake_penalty = mistakes as f64 * 50.0;
    (proportional_base - time_penalty - mistake_penalty).max(0.0) as u32
}

/// One finished (or abandoned) puzzle attempt. Immutable once built; `score`
/// is derived from the other metrics at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub time_seconds: u32,
    pub mistakes: u32,
    pub correct_placements: u32,
    pub score: u32,
    /// Whether the attempt finished the grid. Reported by the caller, never
    /// re-derived from `correct_placements`.
    pub completed: bool,
    /// Filled in by the ranking service after submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    /// Assigned by the remote score service once submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_id: Option<String>,
}

impl GameScore {
    pub fn from_attempt(
        time_seconds: u32,
        mistakes: u32,
        correct_placements: u32,
        completed: bool,
    ) -> Self {
        Self {
            time_seconds,
            mistakes,
            correct_placements,
            score: calculate_score(time_seconds, mistakes, correct_placements, GRID_CELLS),
            completed,
            percentile: None,
            score_id: None,
        }
    }
}
