//! Scoring, XP progression, and local score persistence for the
//! Intersections daily word-grid puzzle.
//!
//! The app shell (UI, backend access, ad SDKs) lives elsewhere; this crate
//! owns the parts with invariants:
//!
//! - [`engine::scoring`] turns raw attempt metrics into a bounded score.
//! - [`engine::progression`] converts scores to XP and cumulative XP to a
//!   level plus progress within it.
//! - [`store`] persists per-day scores under date-derived keys and migrates
//!   whatever it finds back into well-typed records, tolerating legacy field
//!   names and corrupted content.

pub mod engine;
pub mod store;

pub use engine::progression::{
    LevelProgress, MAX_LEVEL, calculate_xp, level_from_xp, level_progress, xp_required_for_level,
};
pub use engine::scoring::{GRID_CELLS, GameScore, calculate_score};
pub use store::json_store::ScoreStore;
pub use store::schema::{ClaimableAnonymousScore, StoredDailyScore};
