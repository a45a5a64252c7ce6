use log::debug;
use serde::{Deserialize, Serialize};

use floorgraph_core::{ColorImage, ColorLegend, Rect, Rgb};

use crate::contour::{trace_contours, Mask};
use crate::error::ExtractError;

/// What a detection pass is looking for. Rooms get the extra preprocessing
/// and filtering described on [`AreaDetector::detect`]; doors are taken
/// as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaKind {
    Room,
    Door,
}

/// Detection thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectParams {
    /// Minimum width and height, in pixels, for a room candidate. Filters
    /// the sliver detections produced by wall thickness.
    pub min_room_side: i32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self { min_room_side: 7 }
    }
}

/// Scans an image for exact-color rectangular regions.
pub struct AreaDetector {
    legend: ColorLegend,
    params: DetectParams,
}

impl AreaDetector {
    pub fn new(legend: ColorLegend) -> Self {
        Self {
            legend,
            params: DetectParams::default(),
        }
    }

    pub fn with_params(mut self, params: DetectParams) -> Self {
        self.params = params;
        self
    }

    /// Detect axis-aligned rectangles of `target` color.
    ///
    /// A scratch copy of the image is normalized first: obstacle-colored
    /// pixels become wall-colored, and for a room pass door-colored pixels
    /// become wall-colored too, so doorways do not fragment room borders.
    ///
    /// Room candidates are grown by one pixel per side and then filtered:
    /// candidates thinner than `min_room_side` in either dimension are
    /// detection noise, and candidates spanning almost the whole raster are
    /// the degenerate background contour. Door candidates are never
    /// filtered by size.
    pub fn detect(
        &self,
        image: &ColorImage,
        target: Rgb,
        kind: AreaKind,
    ) -> Result<Vec<Rect>, ExtractError> {
        let mut scratch = image.clone();
        scratch.recolor(self.legend.obstacle, ColorLegend::WALL);
        if kind == AreaKind::Room {
            scratch.recolor(self.legend.door, ColorLegend::WALL);
        }

        let mask = Mask::from_color(&scratch, target);
        let mut areas = Vec::new();
        for contour in trace_contours(&mask) {
            let rect = contour.to_rect()?;
            match kind {
                AreaKind::Door => areas.push(rect),
                AreaKind::Room => {
                    let rect = rect.grow(1);
                    if self.keep_room(&rect, image) {
                        areas.push(rect);
                    }
                }
            }
        }

        debug!("detected {} {:?} area(s)", areas.len(), kind);
        Ok(areas)
    }

    fn keep_room(&self, rect: &Rect, image: &ColorImage) -> bool {
        rect.width() >= self.params.min_room_side
            && rect.height() >= self.params.min_room_side
            && rect.width() < image.width() as i32 - 1
            && rect.height() < image.height() as i32 - 1
    }
}
