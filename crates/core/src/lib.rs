//! Domain building blocks shared by the catalog crates.
//!
//! Everything here is pure: no database handles, no HTTP types.

pub mod casing;
pub mod error;
pub mod listing;
pub mod slug;
pub mod status;
pub mod types;
