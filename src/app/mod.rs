// OkoView - app/mod.rs
//
// Application layer: catalog ownership, background scanning, state management.
// Dependencies: core layer, platform::fs for file access.
// Must NOT depend on: ui.

pub mod catalog;
pub mod scan;
pub mod state;
