use log::{debug, trace};

use floorgraph_core::{ColorImage, ColorLegend, PixelPos, Rect};
use floorgraph_extract::Room;

use crate::error::RouteError;

/// Index of a room area in the graph's area arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AreaId(pub usize);

/// Index of a waypoint in the graph's waypoint arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaypointId(pub usize);

/// A node of the coarse routing graph: a door centroid or an inserted
/// endpoint, with the areas it borders and the waypoints reachable through
/// them.
///
/// Adjacency is stored as arena indices rather than references, so the
/// mutually-referring neighbor sets carry no lifetime or cycle concerns.
#[derive(Clone, Debug)]
pub struct Waypoint {
    pub position: PixelPos,
    pub areas: Vec<AreaId>,
    pub neighbors: Vec<WaypointId>,
}

/// The coarse routing graph plus the wall-normalized raster it was built
/// from. Built once per map load and discarded with it; endpoint waypoints
/// inserted for a route request are appended at the end of the arena.
#[derive(Clone, Debug)]
pub struct WaypointGraph {
    areas: Vec<Rect>,
    waypoints: Vec<Waypoint>,
    image: ColorImage,
    legend: ColorLegend,
}

impl WaypointGraph {
    /// Build the graph from rooms with attached doors.
    ///
    /// One waypoint is created per distinct door centroid; a door shared by
    /// two rooms yields a single waypoint tagged with both areas. After all
    /// waypoints exist, every pair of distinct waypoints sharing at least
    /// one area is linked both ways. Linking is quadratic in waypoint count
    /// times area count, which is fine at the waypoint counts a floor plan
    /// produces.
    ///
    /// `image` must already be wall-normalized (obstacle color rewritten to
    /// wall); the graph owns it for the lifetime of the load.
    pub fn build(rooms: &[Room], image: ColorImage, legend: ColorLegend) -> Self {
        let mut graph = Self {
            areas: rooms.iter().map(|r| r.bounds).collect(),
            waypoints: Vec::new(),
            image,
            legend,
        };

        for (index, room) in rooms.iter().enumerate() {
            let area = AreaId(index);
            for door in &room.doors {
                let position = door.center();
                match graph.find(position) {
                    Some(id) => {
                        let wp = &mut graph.waypoints[id.0];
                        if !wp.areas.contains(&area) {
                            wp.areas.push(area);
                        }
                    }
                    None => graph.waypoints.push(Waypoint {
                        position,
                        areas: vec![area],
                        neighbors: Vec::new(),
                    }),
                }
            }
        }

        for a in 0..graph.waypoints.len() {
            for b in (a + 1)..graph.waypoints.len() {
                if graph.share_area(a, b) {
                    graph.link(WaypointId(a), WaypointId(b));
                }
            }
        }

        debug!(
            "built waypoint graph: {} waypoint(s) over {} area(s)",
            graph.waypoints.len(),
            graph.areas.len()
        );
        graph
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn waypoint(&self, id: WaypointId) -> &Waypoint {
        &self.waypoints[id.0]
    }

    #[inline]
    pub fn areas(&self) -> &[Rect] {
        &self.areas
    }

    #[inline]
    pub fn area(&self, id: AreaId) -> Rect {
        self.areas[id.0]
    }

    /// The wall-normalized raster this graph was extracted from.
    #[inline]
    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    #[inline]
    pub fn legend(&self) -> &ColorLegend {
        &self.legend
    }

    /// Append a waypoint, linking it both ways with every listed neighbor.
    ///
    /// Two waypoints at the same position are the same logical waypoint:
    /// when one already exists there, its id is returned and nothing is
    /// mutated.
    pub fn add_waypoint(
        &mut self,
        position: PixelPos,
        areas: Vec<AreaId>,
        neighbors: Vec<WaypointId>,
    ) -> WaypointId {
        if let Some(existing) = self.find(position) {
            return existing;
        }
        let id = WaypointId(self.waypoints.len());
        self.waypoints.push(Waypoint {
            position,
            areas,
            neighbors: Vec::new(),
        });
        for n in neighbors {
            self.link(id, n);
        }
        id
    }

    /// Insert a transient route endpoint at `point`.
    ///
    /// Succeeds only when the pixel at `point` is free-space white and the
    /// point lies strictly inside (boundary excluded) exactly one area that
    /// some waypoint already borders. The new waypoint is linked both ways
    /// with every waypoint bordering that area and appended at the end of
    /// the arena. On failure nothing is mutated.
    pub fn insert_point(&mut self, point: PixelPos) -> Result<WaypointId, RouteError> {
        let invalid = RouteError::InvalidPoint {
            x: point.x,
            y: point.y,
        };

        if self.image.get(point) != Some(ColorLegend::FREE) {
            return Err(invalid);
        }

        let mut containing = None;
        for area in self.bordered_areas() {
            if self.area(area).contains_open(point) {
                if containing.is_some() {
                    // Ambiguous: the point claims more than one known area.
                    return Err(invalid);
                }
                containing = Some(area);
            }
        }
        let Some(area) = containing else {
            return Err(invalid);
        };

        let neighbors: Vec<WaypointId> = self
            .waypoints
            .iter()
            .enumerate()
            .filter(|(_, wp)| wp.areas.contains(&area))
            .map(|(i, _)| WaypointId(i))
            .collect();

        let id = self.add_waypoint(point, vec![area], neighbors);
        trace!("inserted endpoint waypoint {:?} at {:?}", id, point);
        Ok(id)
    }

    fn find(&self, position: PixelPos) -> Option<WaypointId> {
        self.waypoints
            .iter()
            .position(|wp| wp.position == position)
            .map(WaypointId)
    }

    fn share_area(&self, a: usize, b: usize) -> bool {
        self.waypoints[a]
            .areas
            .iter()
            .any(|area| self.waypoints[b].areas.contains(area))
    }

    fn link(&mut self, a: WaypointId, b: WaypointId) {
        if a == b {
            return;
        }
        if !self.waypoints[a.0].neighbors.contains(&b) {
            self.waypoints[a.0].neighbors.push(b);
        }
        if !self.waypoints[b.0].neighbors.contains(&a) {
            self.waypoints[b.0].neighbors.push(a);
        }
    }

    /// Area ids referenced by at least one waypoint, without duplicates.
    fn bordered_areas(&self) -> Vec<AreaId> {
        let mut seen = vec![false; self.areas.len()];
        let mut out = Vec::new();
        for wp in &self.waypoints {
            for &area in &wp.areas {
                if !seen[area.0] {
                    seen[area.0] = true;
                    out.push(area);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::from_corners(PixelPos::new(x0, y0), PixelPos::new(x1, y1))
    }

    /// Two rooms joined by one door, on an all-white raster so endpoint
    /// insertion is only constrained by the area geometry.
    fn two_room_graph() -> WaypointGraph {
        let door = rect(18, 8, 20, 10);
        let rooms = vec![
            Room {
                bounds: rect(0, 0, 18, 18),
                doors: vec![door],
            },
            Room {
                bounds: rect(20, 0, 39, 18),
                doors: vec![door],
            },
        ];
        let image = ColorImage::new(40, 20, ColorLegend::FREE);
        WaypointGraph::build(&rooms, image, ColorLegend::default())
    }

    #[test]
    fn shared_door_merges_into_one_waypoint() {
        let graph = two_room_graph();
        assert_eq!(graph.waypoints().len(), 1);
        let wp = graph.waypoint(WaypointId(0));
        assert_eq!(wp.position, PixelPos::new(19, 9));
        assert_eq!(wp.areas, vec![AreaId(0), AreaId(1)]);
    }

    #[test]
    fn waypoints_sharing_an_area_are_linked_both_ways() {
        let d1 = rect(18, 8, 20, 10);
        let d2 = rect(38, 8, 40, 10);
        let rooms = vec![
            Room {
                bounds: rect(0, 0, 18, 18),
                doors: vec![d1],
            },
            Room {
                bounds: rect(20, 0, 38, 18),
                doors: vec![d1, d2],
            },
            Room {
                bounds: rect(40, 0, 59, 18),
                doors: vec![d2],
            },
        ];
        let image = ColorImage::new(60, 20, ColorLegend::FREE);
        let graph = WaypointGraph::build(&rooms, image, ColorLegend::default());

        assert_eq!(graph.waypoints().len(), 2);
        assert_eq!(graph.waypoint(WaypointId(0)).neighbors, vec![WaypointId(1)]);
        assert_eq!(graph.waypoint(WaypointId(1)).neighbors, vec![WaypointId(0)]);
    }

    #[test]
    fn add_waypoint_is_idempotent_by_position() {
        let mut graph = two_room_graph();
        let pos = PixelPos::new(19, 9);
        let id = graph.add_waypoint(pos, vec![AreaId(0)], Vec::new());
        assert_eq!(id, WaypointId(0));
        assert_eq!(graph.waypoints().len(), 1);
        // The existing waypoint keeps its own area tags.
        assert_eq!(graph.waypoint(id).areas, vec![AreaId(0), AreaId(1)]);
    }

    #[test]
    fn add_waypoint_links_symmetrically() {
        let mut graph = two_room_graph();
        let id = graph.add_waypoint(PixelPos::new(5, 5), vec![AreaId(0)], vec![WaypointId(0)]);
        assert!(graph.waypoint(id).neighbors.contains(&WaypointId(0)));
        assert!(graph.waypoint(WaypointId(0)).neighbors.contains(&id));
    }

    #[test]
    fn insert_point_links_with_every_waypoint_of_the_area() {
        let mut graph = two_room_graph();
        let a = graph.insert_point(PixelPos::new(5, 5)).unwrap();
        let b = graph.insert_point(PixelPos::new(12, 12)).unwrap();

        // Both endpoints border area 0, so they link with the door waypoint
        // and with each other.
        for (x, y) in [(a, b), (b, a)] {
            assert!(graph.waypoint(x).neighbors.contains(&y));
            assert!(graph.waypoint(x).neighbors.contains(&WaypointId(0)));
            assert!(graph.waypoint(WaypointId(0)).neighbors.contains(&x));
        }
    }

    #[test]
    fn insert_point_rejects_non_free_pixels() {
        let mut graph = two_room_graph();
        let mut image = graph.image().clone();
        image.set(PixelPos::new(5, 5), ColorLegend::WALL);
        graph.image = image;

        let before = graph.waypoints().len();
        let err = graph.insert_point(PixelPos::new(5, 5)).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPoint { x: 5, y: 5 }));
        assert_eq!(graph.waypoints().len(), before);
    }

    #[test]
    fn insert_point_rejects_area_boundary() {
        let mut graph = two_room_graph();
        // (18, 9) is on the boundary of area 0; the interior test is open.
        assert!(graph.insert_point(PixelPos::new(18, 9)).is_err());
    }

    #[test]
    fn insert_point_rejects_points_outside_every_area() {
        let mut graph = two_room_graph();
        assert!(graph.insert_point(PixelPos::new(19, 19)).is_err());
        assert!(graph.insert_point(PixelPos::new(-3, 4)).is_err());
    }

    #[test]
    fn insert_point_rejects_ambiguous_overlap() {
        let door = rect(18, 8, 20, 10);
        let rooms = vec![
            Room {
                bounds: rect(0, 0, 20, 18),
                doors: vec![door],
            },
            Room {
                bounds: rect(10, 0, 39, 18),
                doors: vec![door],
            },
        ];
        let image = ColorImage::new(40, 20, ColorLegend::FREE);
        let mut graph = WaypointGraph::build(&rooms, image, ColorLegend::default());

        // (15, 9) is strictly inside both overlapping areas.
        assert!(graph.insert_point(PixelPos::new(15, 9)).is_err());
        assert!(graph.insert_point(PixelPos::new(5, 9)).is_ok());
    }

    #[test]
    fn insert_point_requires_a_bordered_area() {
        // A room with no doors produces no waypoints, so its area is not
        // bordered and cannot host endpoints.
        let rooms = vec![Room {
            bounds: rect(0, 0, 18, 18),
            doors: Vec::new(),
        }];
        let image = ColorImage::new(20, 20, ColorLegend::FREE);
        let mut graph = WaypointGraph::build(&rooms, image, ColorLegend::default());
        assert!(graph.insert_point(PixelPos::new(5, 5)).is_err());
    }
}
