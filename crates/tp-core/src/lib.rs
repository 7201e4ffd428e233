//! `tp-core` — foundational types for the `rust_tp` trip planner.
//!
//! This crate is a dependency of every other `tp-*` crate.  It intentionally
//! has no `tp-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VertexId`, `EdgeId`, `StateId`                       |
//! | [`geo`]         | `GeoPoint`, haversine distance, bearings              |
//! | [`mode`]        | `TraverseMode`, `TraverseModeSet`                     |
//! | [`permission`]  | `StreetTraversalPermission` bitset                    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod permission;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, StateId, VertexId};
pub use mode::{TraverseMode, TraverseModeSet};
pub use permission::StreetTraversalPermission;
