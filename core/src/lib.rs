//! Core of the vitalog tracker: the item catalog, the day-log record
//! model, the SQLite-backed store, pure query helpers, chart geometry,
//! and import/export.

pub mod catalog;
pub mod chart;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod query;
