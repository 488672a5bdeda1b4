//! Merging normalized tables: duplicate unification, category combination
//! and output ordering

pub mod combine;
pub mod duplicates;
pub mod ordering;

pub use combine::{combine_categories, Category, COMBINED_FILE_NAME};
pub use duplicates::{unify_duplicates, Conflict, Unified};
pub use ordering::{order_columns, sort_rows, TournamentRanks};
