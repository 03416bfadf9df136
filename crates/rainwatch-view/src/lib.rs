//! Dashboard view session
//!
//! Owns the reading snapshot, search query, and font-size preference, and
//! drives the periodic refresh against the proxy endpoint. Overlapping
//! fetches are resolved with a monotonic sequence check rather than
//! last-write-wins.

pub mod client;
pub mod poller;
pub mod state;

pub use client::*;
pub use poller::*;
pub use state::*;
