//! End-to-end entry points
//!
//! - unify and save tournament summaries or category tables
//! - normalize and append match-log files per entity, then save the batch
//! - summarize any finished table

pub mod accumulate;
pub mod categories;
pub mod pages;
pub mod report;
pub mod tournaments;

pub use accumulate::{group_by_entity, process_entities_and_save, EntityAccumulator};
pub use categories::{combine_and_save, combine_dir_and_save, load_category_dir};
pub use report::{CombinedSummary, SummaryReport};
pub use tournaments::{unify_tournaments, unify_tournaments_and_save, TournamentInput};
