// Mycolog - core/mod.rs
//
// Core business logic layer: the growth log and its derived views.
// Must NOT depend on: platform, app, or any filesystem access.

pub mod alert;
pub mod export;
pub mod filter;
pub mod model;
pub mod settings;
pub mod store;
