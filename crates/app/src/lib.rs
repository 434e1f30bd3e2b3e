//! # App Crate
//!
//! Reactive glue over the stores and the engine:
//! - **controller**: recomputes recommendations whenever a store changes
//! - **session**: the front-end-facing surface, with catalog mutations
//!   gated on an injected authorization capability
//! - **auth**: the capability interface plus a fixed-credential demo
//!   provider

pub mod auth;
pub mod controller;
pub mod session;

// Re-export the front-end surface
pub use auth::{AuthError, AuthProvider, AuthSession, Credentials, DemoAuth};
pub use controller::DerivationController;
pub use session::{MovieSession, SessionError};
