use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use floorgraph_core::PixelPos;

use crate::error::RouteError;
use crate::graph::{WaypointGraph, WaypointId};

/// Policy knobs for the coarse search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteParams {
    /// When `false` (the default), a position moved to the closed set is
    /// never expanded again, even if a cheaper path to it turns up later.
    /// On densely cross-connected graphs this can pick a suboptimal route;
    /// set to `true` to re-open closed positions reached cheaper.
    pub allow_reopen: bool,
}

impl Default for RouteParams {
    fn default() -> Self {
        Self {
            allow_reopen: false,
        }
    }
}

struct Node {
    parent: Option<usize>,
    id: WaypointId,
    position: PixelPos,
    g: i64,
    f: i64,
}

/// Coarse A* over the waypoint graph.
///
/// Cost model: `g(child) = g(parent) + squared_distance(parent, child)`,
/// `h(child) = squared_distance(child, goal)`, `f = g + h`. The open list
/// is scanned linearly for the minimum `f` and the first-found node wins
/// ties. A neighbor is skipped when it equals the current node's own parent
/// (no immediate backtrack), when its position is already closed (unless
/// `allow_reopen`), or when an open node at the same position has a
/// lower-or-equal `g`. Success is popping a node at the goal position; an
/// exhausted open set is [`RouteError::Unroutable`].
pub fn route_waypoints(
    graph: &WaypointGraph,
    start: WaypointId,
    goal: WaypointId,
    params: &RouteParams,
) -> Result<Vec<WaypointId>, RouteError> {
    let start_pos = graph.waypoint(start).position;
    let goal_pos = graph.waypoint(goal).position;

    let mut nodes = vec![Node {
        parent: None,
        id: start,
        position: start_pos,
        g: 0,
        f: start_pos.squared_distance(goal_pos),
    }];
    let mut open: Vec<usize> = vec![0];
    let mut closed: HashMap<PixelPos, i64> = HashMap::new();

    while !open.is_empty() {
        let mut best = 0;
        for (i, &node) in open.iter().enumerate().skip(1) {
            if nodes[node].f < nodes[open[best]].f {
                best = i;
            }
        }
        let current = open.remove(best);
        closed.insert(nodes[current].position, nodes[current].g);

        if nodes[current].position == goal_pos {
            let mut path = Vec::new();
            let mut cursor = Some(current);
            while let Some(n) = cursor {
                path.push(nodes[n].id);
                cursor = nodes[n].parent;
            }
            path.reverse();
            debug!("waypoint route found: {} hop(s)", path.len() - 1);
            return Ok(path);
        }

        let parent_pos = nodes[current].parent.map(|p| nodes[p].position);
        let current_pos = nodes[current].position;
        let current_g = nodes[current].g;

        for &neighbor in &graph.waypoint(nodes[current].id).neighbors {
            let position = graph.waypoint(neighbor).position;
            if parent_pos == Some(position) {
                continue;
            }

            let g = current_g + current_pos.squared_distance(position);
            if let Some(&closed_g) = closed.get(&position) {
                if !params.allow_reopen || g >= closed_g {
                    continue;
                }
                closed.remove(&position);
            }
            if open
                .iter()
                .any(|&n| nodes[n].position == position && nodes[n].g <= g)
            {
                continue;
            }

            nodes.push(Node {
                parent: Some(current),
                id: neighbor,
                position,
                g,
                f: g + position.squared_distance(goal_pos),
            });
            open.push(nodes.len() - 1);
        }
    }

    Err(RouteError::Unroutable)
}
