//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod history;
pub mod pulse;
pub mod render;
