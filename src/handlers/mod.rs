//! HTTP handlers

pub mod cache;
pub mod drivers;
pub mod health;
pub mod stats;
