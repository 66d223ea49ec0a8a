//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod classify;
pub mod forecast;
pub mod health;
pub mod insights;

// Re-export all handlers for use in router
pub use classify::*;
pub use forecast::*;
pub use health::*;
pub use insights::*;
