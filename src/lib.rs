//! Payoff, trade preview and tournament scoring for swipeable crypto options.

pub mod config;
pub mod errors;
pub mod payoff;
pub mod preview;
pub mod server;
pub mod state;
pub mod tournament;
