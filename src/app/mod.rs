// Mycolog - app/mod.rs
//
// Application layer: session state, command grammar, the command loop,
// and text rendering of each page.
// Dependencies: core, platform, util.

pub mod command;
pub mod driver;
pub mod session;
pub mod view;
