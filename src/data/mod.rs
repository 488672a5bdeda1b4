//! Data ingestion and storage
//!
//! Tables and records, canonical schemas, CSV persistence, source-file
//! metadata and offline parsing of saved statistics pages.

pub mod csv_io;
pub mod pages;
pub mod schema;
pub mod sources;
pub mod table;

pub use csv_io::{read_table, write_table};
pub use schema::{EntityKind, Schema};
pub use sources::{SourceBatch, SourceInfo};
pub use table::Table;
