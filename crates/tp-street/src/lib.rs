//! `tp-street` — street graph, permissions, turn restrictions, snapping.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`graph`]       | `StreetGraph` (CSR + R-tree), `Vertex`, `Edge`           |
//! | [`builder`]     | `GraphBuilder`, `EdgeSpec`                               |
//! | [`restriction`] | `TurnRestriction`, `ValidityWindow`, `turn_allowed`      |
//! | [`barrier`]     | `BarrierKind` → denied modes                             |
//! | [`integrity`]   | `IntegrityIssue`, per-edge and per-restriction checks    |
//! | [`loader`]      | CSV loading of pre-translated networks                   |
//! | [`error`]       | `StreetError`, `StreetResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `tp-core` types.        |

pub mod barrier;
pub mod builder;
pub mod error;
pub mod graph;
pub mod integrity;
pub mod loader;
pub mod restriction;

#[cfg(test)]
mod tests;

pub use barrier::BarrierKind;
pub use builder::{EdgeSpec, GraphBuilder};
pub use error::{StreetError, StreetResult};
pub use graph::{Edge, StreetGraph, Vertex};
pub use integrity::IntegrityIssue;
pub use loader::{load_graph_dir, load_graph_readers};
pub use restriction::{
    turn_allowed, TurnRestriction, TurnRestrictionType, ValidityWindow, SECONDS_PER_DAY,
};
