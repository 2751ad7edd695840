//! Headless scripted-match execution
//!
//! Lets a match be replayed from a JSON config (hero picks, board
//! parameters, seed, intent script) with no graphical output. This is the
//! reference presentation adapter and the vehicle for deterministic
//! regression runs.

pub mod config;
pub mod runner;

pub use config::{HeadlessMatchConfig, ScriptedIntent};
pub use runner::{
    build_headless_app, run_headless_match, run_scripted_match, HeadlessPlugin, MatchEndReason,
    MatchReport,
};
