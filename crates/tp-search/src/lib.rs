//! `tp-search` — A* street search, intersection costs, path reconstruction.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`astar`]        | `AStar` engine, `RouteOutcome`, `SearchRun`                |
//! | [`intersection`] | `IntersectionTraversalCalculator` and two implementations  |
//! | [`preferences`]  | `RoutingPreferences`, `PerMode`, `Heuristic`               |
//! | [`request`]      | `RouteRequest`                                             |
//! | [`state`]        | `SearchState`, `StateArena`                                |
//! | [`frontier`]     | `Frontier` (min-heap with insertion-order ties)            |
//! | [`spt`]          | `ShortestPathTree`                                         |
//! | [`path`]         | `GraphPath`, `PathState`                                   |
//! | [`cancel`]       | `CancellationToken`                                        |
//! | [`observer`]     | `SearchObserver`, `NoopObserver`, `SearchStats`            |
//! | [`router`]       | `Router` trait, `AStarRouter`, `route_batch`               |
//! | [`error`]        | `SearchError`, `RequestError`, `SearchResult<T>`           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `route_batch` fans requests out over a rayon thread pool. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on preferences.         |

pub mod astar;
pub mod cancel;
pub mod error;
pub mod frontier;
pub mod intersection;
pub mod observer;
pub mod path;
pub mod preferences;
pub mod request;
pub mod router;
pub mod spt;
pub mod state;


pub use astar::{AStar, RouteOutcome, SearchRun, SearchStatus};
pub use cancel::CancellationToken;
pub use error::{RequestError, SearchError, SearchResult};
pub use frontier::Frontier;
pub use intersection::{
    ConstantIntersectionTraversalCalculator, IntersectionTraversalCalculator,
    SimpleIntersectionConfig, SimpleIntersectionTraversalCalculator, TurnDirection,
};
pub use observer::{NoopObserver, RejectReason, SearchObserver, SearchStats};
pub use path::{GraphPath, PathState};
pub use preferences::{Heuristic, PerMode, RoutingPreferences};
pub use request::RouteRequest;
pub use router::{route_batch, AStarRouter, Router};
pub use spt::ShortestPathTree;
pub use state::{SearchState, StateArena};
