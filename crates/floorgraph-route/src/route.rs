use log::{debug, info};

use floorgraph_core::{ColorImage, PixelPos};

use crate::error::RouteError;
use crate::graph::{WaypointGraph, WaypointId};
use crate::grid::{route_pixels, FreeMask};
use crate::search::{route_waypoints, RouteParams};

/// A computed route: the concatenated pixel path and the annotated raster.
#[derive(Clone, Debug)]
pub struct Route {
    pub pixels: Vec<PixelPos>,
    pub image: ColorImage,
}

/// Runs the two search tiers over one waypoint graph.
///
/// The computer borrows the graph and works on a copy of its raster, so a
/// request leaves the graph's own image untouched.
pub struct RouteComputer<'a> {
    graph: &'a WaypointGraph,
    params: RouteParams,
}

impl<'a> RouteComputer<'a> {
    pub fn new(graph: &'a WaypointGraph) -> Self {
        Self {
            graph,
            params: RouteParams::default(),
        }
    }

    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Compute the pixel route between two endpoint waypoints.
    ///
    /// Stage 1 finds the doorway sequence on the waypoint graph; when it
    /// fails with [`RouteError::Unroutable`] the fine stage never runs.
    /// Stage 2 then refines each consecutive waypoint pair on the pixel
    /// grid and the per-segment paths are joined (each segment starts on
    /// the pixel the previous one ended on, so the joint pixel is kept
    /// once and the result stays 4-connected).
    pub fn compute(&self, start: WaypointId, goal: WaypointId) -> Result<Route, RouteError> {
        let hops = route_waypoints(self.graph, start, goal, &self.params)?;

        let mut canvas = self.graph.image().clone();
        let mask = FreeMask::from_image(self.graph.image(), self.graph.legend());

        let mut pixels: Vec<PixelPos> = Vec::new();
        for pair in hops.windows(2) {
            let from = self.graph.waypoint(pair[0]).position;
            let to = self.graph.waypoint(pair[1]).position;
            let segment = route_pixels(&mask, from, to, &mut canvas, self.graph.legend())?;
            debug!(
                "refined hop {:?} -> {:?}: {} pixel(s)",
                from,
                to,
                segment.len()
            );
            if pixels.is_empty() {
                pixels.extend(segment);
            } else {
                pixels.extend(segment.into_iter().skip(1));
            }
        }

        info!(
            "route computed: {} hop(s), {} pixel(s)",
            hops.len().saturating_sub(1),
            pixels.len()
        );
        Ok(Route {
            pixels,
            image: canvas,
        })
    }
}
