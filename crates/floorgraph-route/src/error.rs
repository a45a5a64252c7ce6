/// Errors produced while inserting route endpoints or computing a route.
///
/// All of these are scoped to the in-flight request: the caller may retry
/// with corrected input, and no graph state is corrupted by a failure.
#[derive(thiserror::Error, Debug)]
pub enum RouteError {
    /// The requested endpoint is not a free-space pixel, or does not lie
    /// strictly inside exactly one known room area. The graph is left
    /// untouched.
    #[error("point ({x}, {y}) is not a routable free-space position")]
    InvalidPoint { x: i32, y: i32 },

    /// The coarse search exhausted its open set without reaching the goal:
    /// start and goal sit in disconnected regions of the waypoint graph.
    /// This is a distinct outcome, never an empty path.
    #[error("no route exists between the requested endpoints")]
    Unroutable,

    /// A route was requested before both endpoints were inserted.
    #[error("route endpoints are not set (have {have}, need 2)")]
    MissingEndpoints { have: usize },
}
