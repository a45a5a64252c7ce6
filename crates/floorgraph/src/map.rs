use log::info;

use floorgraph_core::{ColorImage, ColorLegend, PixelPos};
use floorgraph_extract::{attach_doors, AreaDetector, AreaKind, ExtractError};
use floorgraph_route::{Route, RouteComputer, RouteError, RouteParams, WaypointGraph, WaypointId};

#[cfg(feature = "image")]
use std::path::Path;

/// Errors aborting a map load. Scoped to the load: the caller may retry
/// with a corrected image.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[cfg(feature = "image")]
    #[error("failed to open map image")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// One loaded floor plan: the wall-normalized raster, its waypoint graph,
/// and the endpoints inserted for the current route request.
///
/// The map owns everything it needs; dropping it discards the graph. There
/// is no cross-load reuse.
pub struct FloorMap {
    graph: WaypointGraph,
    endpoints: Vec<WaypointId>,
    params: RouteParams,
}

/// Read a floor-plan image from disk and extract its graph.
#[cfg(feature = "image")]
pub fn load_map(path: impl AsRef<Path>, legend: &ColorLegend) -> Result<FloorMap, LoadError> {
    let decoded = image::ImageReader::open(path.as_ref())?.decode()?.to_rgb8();
    FloorMap::from_rgb(&decoded, legend)
}

impl FloorMap {
    /// Extract rooms and doors from an in-memory raster and build the
    /// waypoint graph.
    ///
    /// Door areas are detected first, then room areas (with door pixels
    /// treated as wall so doorways do not fragment room borders), doors are
    /// attached to flush rooms, and finally the obstacle color is
    /// normalized to wall on the raster the graph keeps.
    pub fn from_color_image(image: ColorImage, legend: &ColorLegend) -> Result<Self, LoadError> {
        let detector = AreaDetector::new(*legend);
        let doors = detector.detect(&image, legend.door, AreaKind::Door)?;
        let room_areas = detector.detect(&image, ColorLegend::FREE, AreaKind::Room)?;
        let rooms = attach_doors(&room_areas, &doors);

        let mut normalized = image;
        normalized.recolor(legend.obstacle, ColorLegend::WALL);
        let graph = WaypointGraph::build(&rooms, normalized, *legend);

        info!(
            "map loaded: {} room(s), {} door(s)",
            rooms.len(),
            doors.len()
        );
        Ok(Self {
            graph,
            endpoints: Vec::new(),
            params: RouteParams::default(),
        })
    }

    /// Build from a decoded `image` crate buffer.
    #[cfg(feature = "image")]
    pub fn from_rgb(rgb: &image::RgbImage, legend: &ColorLegend) -> Result<Self, LoadError> {
        let (w, h) = (rgb.width() as usize, rgb.height() as usize);
        let mut raster = ColorImage::new(w, h, ColorLegend::WALL);
        for (x, y, px) in rgb.enumerate_pixels() {
            raster.set(PixelPos::new(x as i32, y as i32), px.0);
        }
        Self::from_color_image(raster, legend)
    }

    /// Insert a route endpoint, returning the detailed rejection.
    ///
    /// A rejected point mutates nothing; the caller retries with a new
    /// point and the pending endpoint slot stays as it was.
    pub fn insert_point(&mut self, x: i32, y: i32) -> Result<(), RouteError> {
        let id = self.graph.insert_point(PixelPos::new(x, y))?;
        self.endpoints.push(id);
        Ok(())
    }

    /// Boolean convenience over [`FloorMap::insert_point`].
    pub fn try_insert_point(&mut self, x: i32, y: i32) -> bool {
        self.insert_point(x, y).is_ok()
    }

    /// Compute the route between the two most recently inserted endpoints.
    pub fn compute_route(&self) -> Result<Route, RouteError> {
        if self.endpoints.len() < 2 {
            return Err(RouteError::MissingEndpoints {
                have: self.endpoints.len(),
            });
        }
        let start = self.endpoints[self.endpoints.len() - 2];
        let goal = self.endpoints[self.endpoints.len() - 1];
        RouteComputer::new(&self.graph)
            .with_params(self.params)
            .compute(start, goal)
    }

    /// Compute the route and return it as plain coordinates plus the
    /// annotated image buffer, ready for the caller to display. No
    /// higher-level rendering is performed on the buffer.
    #[cfg(feature = "image")]
    pub fn compute_path(&self) -> Result<(Vec<(i32, i32)>, image::RgbImage), RouteError> {
        let route = self.compute_route()?;
        let path = route.pixels.iter().map(|p| (p.x, p.y)).collect();
        Ok((path, to_rgb_image(&route.image)))
    }

    /// Route policy used by subsequent [`FloorMap::compute_route`] calls.
    pub fn set_route_params(&mut self, params: RouteParams) {
        self.params = params;
    }

    #[inline]
    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }
}

#[cfg(feature = "image")]
fn to_rgb_image(raster: &ColorImage) -> image::RgbImage {
    let mut out = image::RgbImage::new(raster.width() as u32, raster.height() as u32);
    for (i, px) in raster.pixels().iter().enumerate() {
        let x = (i % raster.width()) as u32;
        let y = (i / raster.width()) as u32;
        out.put_pixel(x, y, image::Rgb(*px));
    }
    out
}
