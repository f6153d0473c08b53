// OkoView - core/mod.rs
//
// Core business logic layer: file naming rules, date extraction, row parsing,
// table projections and export.
// Must NOT depend on: ui, platform, app.

pub mod discovery;
pub mod export;
pub mod model;
pub mod parser;
pub mod table;
