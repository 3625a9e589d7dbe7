/// Initiative Tracker - turn order engine for tabletop encounters
///
/// Core library keeping combat participants in initiative order and
/// tracking whose turn it is as creatures join, leave and get reordered.

pub mod config;
pub mod core;
