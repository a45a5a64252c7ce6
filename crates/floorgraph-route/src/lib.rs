//! Waypoint graph and route computation.
//!
//! Routing runs in two tiers. The coarse stage searches the waypoint graph
//! (one node per door centroid, plus the two transient endpoints of the
//! current request) and yields the sequence of doorways to cross. The fine
//! stage then refines each doorway-to-doorway hop into a 4-connected pixel
//! path over the obstacle mask, annotating the output raster as it goes.
//!
//! Both stages use the squared Euclidean distance as heuristic and (for the
//! coarse stage) edge cost. Squared distances do not satisfy the triangle
//! inequality across hops, so the search is not a textbook admissible A*
//! and the coarse route carries no optimality guarantee; it strongly favors
//! few, long hops, which is the wanted behavior for doorway sequencing.

mod error;
mod graph;
mod grid;
mod route;
mod search;

pub use error::RouteError;
pub use graph::{AreaId, Waypoint, WaypointGraph, WaypointId};
pub use grid::{route_pixels, FreeMask};
pub use route::{Route, RouteComputer};
pub use search::{route_waypoints, RouteParams};
