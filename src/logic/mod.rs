//! Core catalog logic
//!
//! One shared implementation of normalization, filtering, search,
//! statistics and caching, consumed by the HTTP layer here and reusable by
//! any client-side mirror that fetches the dataset and re-applies the same
//! predicates locally.

pub mod cache;
pub mod fallback;
pub mod filters;
pub mod normalize;
pub mod search;
pub mod stats;

#[cfg(test)]
mod tests;
