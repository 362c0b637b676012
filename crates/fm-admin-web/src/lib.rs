//! FM Admin Console
//!
//! A locally served, single-operator admin console over the FM business API:
//! gallery management, booking inquiries and an aggregated dashboard, all
//! behind a token-presence session guard.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod guard;
pub mod handlers;
pub mod notify;
pub mod routes;
pub mod screens;
pub mod server;
pub mod state;
pub mod views;

// Re-export the main functions
pub use guard::{Access, Route, SessionGuard};
pub use server::build_app;
pub use state::AppState;
