// Mycolog - lib.rs
//
// Library entry point, exposing every module for integration testing and
// for front ends other than the bundled command loop.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
