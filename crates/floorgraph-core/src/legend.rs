use serde::{Deserialize, Serialize};

use crate::image::Rgb;

/// Color convention of the input floor plan and of the route overlay.
///
/// Door and obstacle colors are the only configurable entries; free space is
/// pure white and walls are pure black by construction. Matching is exact,
/// the legend carries no tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLegend {
    /// Marks door areas in the input image.
    pub door: Rgb,
    /// Marks movable obstacles; normalized to the wall color before
    /// segmentation.
    pub obstacle: Rgb,
    /// Overlay color for every pixel opened by the fine search.
    pub explored: Rgb,
    /// Overlay color for the final pixel path.
    pub path: Rgb,
}

impl ColorLegend {
    /// Free-space color, fixed by construction.
    pub const FREE: Rgb = [255, 255, 255];
    /// Wall color, fixed by construction.
    pub const WALL: Rgb = [0, 0, 0];
}

impl Default for ColorLegend {
    fn default() -> Self {
        Self {
            door: [0, 255, 0],
            obstacle: [255, 0, 0],
            explored: [0, 255, 0],
            path: [255, 0, 0],
        }
    }
}
