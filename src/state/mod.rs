//! State management module
//!
//! The tap's state is a flat JSON object mapping stream id to the last
//! `sequence_id` synced, e.g. `{"qa": 502, "feedback": null}`. It is read
//! once at start-up and written once, after every selected stream has
//! finished.

mod types;

pub use types::State;
