//! friendlink-core — Pure domain logic, no UI.
//!
//! The add-friend form as a UI-agnostic state machine: identifier extraction,
//! submission state, reply interpretation and the transport seam. Frontends
//! (TUI, Web) drive a [`form::FriendForm`] and render its state.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod types;
