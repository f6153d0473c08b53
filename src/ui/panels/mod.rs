// OkoView - ui/panels/mod.rs

pub mod calendar;
pub mod detail;
pub mod overview;
pub mod table;
pub mod warnings;
